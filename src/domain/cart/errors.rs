use rust_decimal::Decimal;

use crate::domain::ids::VariantId;

// ============================================================================
// Cart Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    #[error("Price cannot be negative: {0}")]
    NegativePrice(Decimal),

    #[error("Variant {0} is not in the cart")]
    ItemNotFound(VariantId),

    #[error("Cart total is too large")]
    TotalOverflow,
}
