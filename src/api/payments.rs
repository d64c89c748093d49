use async_trait::async_trait;
use uuid::Uuid;

use super::client::ApiClient;
use super::error::ApiError;
use crate::domain::payment::{PaymentIntent, PaymentIntentRequest};

// ============================================================================
// Payments Endpoint
// ============================================================================
//
// POST /payments/intent
//
// Each call carries a fresh Idempotency-Key so the backend can collapse a
// resent request into the intent it already created.
//
// ============================================================================

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    async fn create_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent, ApiError>;
}

#[async_trait]
impl PaymentsApi for ApiClient {
    async fn create_intent(&self, request: &PaymentIntentRequest) -> Result<PaymentIntent, ApiError> {
        let url = self.endpoint(&["payments", "intent"])?;
        let idempotency_key = Uuid::new_v4();

        let builder = self
            .post(url, request)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string());
        let intent: PaymentIntent = self.send("payments.intent", builder).await?;

        tracing::info!(
            order_id = %request.order_id,
            method = request.method.name(),
            intent_id = %intent.id,
            status = %intent.status,
            "💳 Payment intent created"
        );

        Ok(intent)
    }
}
