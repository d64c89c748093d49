use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::{CartProduct, CartVariant};
use crate::domain::ids::{BusinessId, ProductId, VariantId};

// ============================================================================
// Catalog Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessKind {
    Merchant,
    Supplier,
    Restaurant,
    Carrier,
    #[serde(other)]
    Unknown,
}

/// A business a user operates as, or buys from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRef {
    pub id: BusinessId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<BusinessKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub business_id: BusinessId,
    #[serde(default)]
    pub business: Option<BusinessRef>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    pub fn variant(&self, variant_id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|variant| &variant.id == variant_id)
    }

    /// Cheapest variant price, for list views
    pub fn starting_price(&self) -> Option<Decimal> {
        self.variants.iter().map(|variant| variant.price).min()
    }

    /// Cart-ready view of this product; the listing business supplies it
    pub fn to_cart_product(&self) -> CartProduct {
        let supplier_name = self
            .business
            .as_ref()
            .map(|business| business.name.clone())
            .unwrap_or_default();

        CartProduct {
            product_id: self.id.clone(),
            name: self.name.clone(),
            business_id: self.business_id.clone(),
            supplier_business_id: self.business_id.clone(),
            supplier_name,
            image_url: self.image_url.clone(),
        }
    }
}

impl Variant {
    pub fn to_cart_variant(&self) -> CartVariant {
        CartVariant {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
        }
    }
}
