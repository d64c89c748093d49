use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;
use super::value_objects::OrderStatus;
use crate::domain::cart::{distinct_suppliers, CartItem};
use crate::domain::ids::{BusinessId, VariantId};

// ============================================================================
// Order Requests - Represent user intent sent to the backend
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Sale,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub variant_id: VariantId,
    pub quantity: u32,
}

/// Body of `POST /orders`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub business_id: BusinessId,
    pub supplier_business_id: BusinessId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub lines: Vec<OrderLineRequest>,
}

/// Body of `PATCH /orders/:id/status`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StatusUpdate {
    pub fn cancel(reason: Option<String>) -> Self {
        Self {
            status: OrderStatus::Cancelled,
            reason,
        }
    }
}

/// Build the sale payload for a single-supplier cart
///
/// Blank notes are dropped. Nothing here touches the network, so a rejected
/// cart never produces a request.
pub fn build_order_payload(
    items: &[CartItem],
    business_id: &BusinessId,
    notes: Option<&str>,
) -> Result<CreateOrderPayload, CheckoutError> {
    let first = items.first().ok_or(CheckoutError::EmptyCart)?;

    let suppliers = distinct_suppliers(items);
    if suppliers.len() > 1 {
        return Err(CheckoutError::MixedSuppliers { suppliers });
    }

    Ok(CreateOrderPayload {
        order_type: OrderType::Sale,
        business_id: business_id.clone(),
        supplier_business_id: first.supplier_business_id.clone(),
        notes: notes
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string),
        lines: items
            .iter()
            .map(|item| OrderLineRequest {
                variant_id: item.variant_id.clone(),
                quantity: item.quantity,
            })
            .collect(),
    })
}
