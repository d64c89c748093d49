use std::sync::Arc;

use super::commands::build_order_payload;
use super::errors::CheckoutError;
use super::value_objects::Order;
use crate::api::{OrdersApi, PaymentsApi};
use crate::domain::payment::{PaymentIntent, PaymentIntentRequest, PaymentMethod};
use crate::metrics::ClientMetrics;
use crate::state::SessionStore;

// ============================================================================
// Checkout Handler
// ============================================================================
//
// Orchestrates: Cart snapshot → Validation → POST /orders → Payment intent
//               → Remove the ordered lines from the cart
//
// Validation failures never reach the network. The cart survives every
// failure, including a payment failure after the order exists.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub notes: Option<String>,
    pub payment: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The cart was empty; nothing was sent
    NothingToCheckout,
    Placed { order: Order, intent: PaymentIntent },
}

pub struct CheckoutHandler {
    orders: Arc<dyn OrdersApi>,
    payments: Arc<dyn PaymentsApi>,
    session: SessionStore,
    metrics: Arc<ClientMetrics>,
}

impl CheckoutHandler {
    pub fn new(
        orders: Arc<dyn OrdersApi>,
        payments: Arc<dyn PaymentsApi>,
        session: SessionStore,
        metrics: Arc<ClientMetrics>,
    ) -> Self {
        Self {
            orders,
            payments,
            session,
            metrics,
        }
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        let result = self.place(request).await;

        let outcome = match &result {
            Ok(CheckoutOutcome::NothingToCheckout) => "nothing_to_checkout",
            Ok(CheckoutOutcome::Placed { .. }) => "placed",
            Err(error) if error.is_validation() => "invalid",
            Err(CheckoutError::OrderRejected(_)) => "order_rejected",
            Err(_) => "payment_failed",
        };
        self.metrics.record_checkout(outcome);

        result
    }

    async fn place(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, CheckoutError> {
        let cart = self.session.cart().await;
        if cart.is_empty() {
            tracing::info!("Cart is empty, nothing to check out");
            return Ok(CheckoutOutcome::NothingToCheckout);
        }

        let business = self
            .session
            .selected_business()
            .await
            .ok_or(CheckoutError::NoBusinessSelected)?;

        let payload = build_order_payload(cart.items(), &business.id, request.notes.as_deref())?;

        tracing::info!(
            business_id = %payload.business_id,
            supplier_business_id = %payload.supplier_business_id,
            lines = payload.lines.len(),
            total = %cart.total_price(),
            "🛒 Submitting order"
        );

        let order = self
            .orders
            .create_order(&payload)
            .await
            .map_err(CheckoutError::OrderRejected)?;

        let intent_request = PaymentIntentRequest {
            order_id: order.id.clone(),
            method: request.payment,
        };
        let intent = match self.payments.create_intent(&intent_request).await {
            Ok(intent) => intent,
            Err(source) => {
                tracing::error!(
                    order_id = %order.id,
                    method = intent_request.method.name(),
                    error = %source,
                    "Order created but payment intent failed; cart kept"
                );
                return Err(CheckoutError::PaymentFailed {
                    order_id: order.id,
                    source,
                });
            }
        };

        // Only what was ordered; lines added meanwhile stay for the next checkout
        self.session.remove_ordered(cart.ordered_lines()).await;

        tracing::info!(
            order_id = %order.id,
            reference = order.reference(),
            intent_id = %intent.id,
            "✅ Checkout complete"
        );

        Ok(CheckoutOutcome::Placed { order, intent })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
