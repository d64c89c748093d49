use async_trait::async_trait;
use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::pagination::{PageRequest, Paginated};
use crate::domain::catalog::{BusinessRef, Product};
use crate::domain::ids::{BusinessId, ProductId};

// ============================================================================
// Catalog Endpoints
// ============================================================================

#[derive(Serialize)]
struct ProductQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(
        &self,
        business_id: &BusinessId,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Product>, ApiError>;

    async fn get_product(&self, product_id: &ProductId) -> Result<Product, ApiError>;

    async fn list_businesses(&self, page: PageRequest) -> Result<Paginated<BusinessRef>, ApiError>;
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_products(
        &self,
        business_id: &BusinessId,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Product>, ApiError> {
        let url = self.endpoint(&["businesses", business_id.as_str(), "products"])?;
        let query = ProductQuery {
            page: page.page,
            limit: page.limit,
            search: search.as_deref().map(str::trim).filter(|search| !search.is_empty()),
        };
        self.send("catalog.products", self.get(url).query(&query)).await
    }

    async fn get_product(&self, product_id: &ProductId) -> Result<Product, ApiError> {
        let url = self.endpoint(&["products", product_id.as_str()])?;
        self.send("catalog.product", self.get(url)).await
    }

    async fn list_businesses(&self, page: PageRequest) -> Result<Paginated<BusinessRef>, ApiError> {
        let url = self.endpoint(&["businesses"])?;
        self.send("catalog.businesses", self.get(url).query(&page)).await
    }
}
