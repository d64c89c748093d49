use async_trait::async_trait;
use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::pagination::{PageRequest, Paginated};
use crate::domain::ids::{BusinessId, OrderId};
use crate::domain::order::{CreateOrderPayload, Order, OrderStatus, StatusUpdate};

// ============================================================================
// Orders Endpoints
// ============================================================================
//
// POST   /orders              create a sale
// GET    /orders              list (scoped, filtered, paged)
// GET    /orders/:id          detail
// PATCH  /orders/:id/status   status change or cancellation
//
// Reads run under the read retry policy; writes are sent once.
//
// ============================================================================

/// Whose orders to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    /// Orders placed by the signed-in user
    Mine,
    /// Orders placed with, or by, a business
    Business(BusinessId),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderListQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_id: Option<&'a BusinessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<OrderStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn create_order(&self, payload: &CreateOrderPayload) -> Result<Order, ApiError>;

    async fn list_orders(
        &self,
        scope: &OrderScope,
        status: Option<OrderStatus>,
        page: PageRequest,
    ) -> Result<Paginated<Order>, ApiError>;

    async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError>;

    async fn update_status(&self, order_id: &OrderId, update: &StatusUpdate) -> Result<Order, ApiError>;
}

#[async_trait]
impl OrdersApi for ApiClient {
    async fn create_order(&self, payload: &CreateOrderPayload) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders"])?;
        let order: Order = self.send("orders.create", self.post(url, payload)).await?;

        tracing::info!(
            order_id = %order.id,
            supplier = %payload.supplier_business_id,
            lines = payload.lines.len(),
            "📦 Order created"
        );

        Ok(order)
    }

    async fn list_orders(
        &self,
        scope: &OrderScope,
        status: Option<OrderStatus>,
        page: PageRequest,
    ) -> Result<Paginated<Order>, ApiError> {
        let url = self.endpoint(&["orders"])?;
        let query = OrderListQuery {
            page: page.page,
            limit: page.limit,
            business_id: match scope {
                OrderScope::Mine => None,
                OrderScope::Business(business_id) => Some(business_id),
            },
            status,
        };

        self.get_with_retry("orders.list", url, &query).await
    }

    async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders", order_id.as_str()])?;
        self.get_with_retry("orders.get", url, &[] as &[(&str, &str)]).await
    }

    async fn update_status(&self, order_id: &OrderId, update: &StatusUpdate) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders", order_id.as_str(), "status"])?;
        let order: Order = self.send("orders.update_status", self.patch(url, update)).await?;

        tracing::info!(
            order_id = %order.id,
            status = %order.status,
            "Order status updated"
        );

        Ok(order)
    }
}
