use serde::{Deserialize, Serialize};

use super::value_objects::CartItem;
use crate::domain::ids::VariantId;
use crate::state::DomainEvent;

// ============================================================================
// Cart Events
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    ItemAdded(CartItemAdded),
    QuantityChanged(CartQuantityChanged),
    ItemRemoved(CartItemRemoved),
    Cleared(CartCleared),
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "CartItemAdded",
            CartEvent::QuantityChanged(_) => "CartQuantityChanged",
            CartEvent::ItemRemoved(_) => "CartItemRemoved",
            CartEvent::Cleared(_) => "CartCleared",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemAdded {
    pub item: CartItem,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartQuantityChanged {
    pub variant_id: VariantId,
    pub old_quantity: u32,
    pub new_quantity: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRemoved {
    pub variant_id: VariantId,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartCleared {
    pub line_count: usize,
}
