use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BusinessId, ProductId, VariantId};

// ============================================================================
// Cart Value Objects
// ============================================================================

/// One cart line; at most one line exists per variant
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub variant_id: VariantId,
    pub variant_name: String,
    /// Business the product was listed under in the catalog
    pub business_id: BusinessId,
    pub supplier_business_id: BusinessId,
    pub supplier_name: String,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartItem {
    /// Price times quantity; the aggregate never stores a line where this overflows
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    pub fn checked_line_total(&self) -> Option<Decimal> {
        checked_line_total(self.price, self.quantity)
    }

    pub fn ordered(&self) -> OrderedLine {
        OrderedLine {
            variant_id: self.variant_id.clone(),
            quantity: self.quantity,
        }
    }
}

pub(crate) fn checked_line_total(price: Decimal, quantity: u32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity))
}

/// Distinct supplier businesses, in order of first appearance
pub fn distinct_suppliers(items: &[CartItem]) -> Vec<BusinessId> {
    let mut suppliers: Vec<BusinessId> = Vec::new();
    for item in items {
        if !suppliers.contains(&item.supplier_business_id) {
            suppliers.push(item.supplier_business_id.clone());
        }
    }
    suppliers
}

/// A variant and the quantity of it that went into a placed order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderedLine {
    pub variant_id: VariantId,
    pub quantity: u32,
}

/// Product details captured when one of its variants is added
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub product_id: ProductId,
    pub name: String,
    pub business_id: BusinessId,
    pub supplier_business_id: BusinessId,
    pub supplier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartVariant {
    pub id: VariantId,
    pub name: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product_id: ProductId::new("p1"),
            product_name: "Rice".to_string(),
            variant_id: VariantId::new("v1"),
            variant_name: "25kg".to_string(),
            business_id: BusinessId::new("s1"),
            supplier_business_id: BusinessId::new("s1"),
            supplier_name: "Grain Co".to_string(),
            quantity: 3,
            price: Decimal::from_str("12.50").unwrap(),
            image_url: None,
        };

        assert_eq!(item.line_total(), Decimal::from_str("37.50").unwrap());
        assert_eq!(item.ordered(), OrderedLine { variant_id: VariantId::new("v1"), quantity: 3 });
    }

    #[test]
    fn test_checked_line_total_reports_overflow() {
        let price = Decimal::from_str("100000000000000000000").unwrap();

        assert_eq!(checked_line_total(price, 1), Some(price));
        assert_eq!(checked_line_total(price, u32::MAX), None);
    }
}
