use crate::api::ApiError;
use crate::domain::ids::{BusinessId, OrderId};

// ============================================================================
// Checkout Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Select the business you are ordering for first")]
    NoBusinessSelected,

    #[error("All items in an order must come from the same supplier ({} found)", .suppliers.len())]
    MixedSuppliers { suppliers: Vec<BusinessId> },

    #[error("Order was not created: {}", .0.user_message())]
    OrderRejected(#[source] ApiError),

    #[error("Order {order_id} was created but payment could not be started: {}", .source.user_message())]
    PaymentFailed {
        order_id: OrderId,
        #[source]
        source: ApiError,
    },
}

impl CheckoutError {
    /// Failed before any request left the client
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CheckoutError::EmptyCart | CheckoutError::NoBusinessSelected | CheckoutError::MixedSuppliers { .. }
        )
    }
}
