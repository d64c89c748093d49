use super::value_objects::{CartProduct, CartVariant, OrderedLine};
use crate::domain::ids::VariantId;

// ============================================================================
// Cart Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Append a line, or increment the line holding the same variant
    AddItem {
        product: CartProduct,
        variant: CartVariant,
        quantity: u32,
    },
    /// Shift a line's quantity; the line goes away when it reaches zero
    UpdateQuantity {
        variant_id: VariantId,
        delta: i64,
    },
    RemoveItem {
        variant_id: VariantId,
    },
    /// Take placed quantities out of the cart, leaving anything added since
    RemoveOrdered {
        lines: Vec<OrderedLine>,
    },
    Clear,
}
