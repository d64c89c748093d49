use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::core::{Aggregate, DomainEvent, EventEnvelope};
use crate::domain::cart::{CartAggregate, CartCommand, CartError, CartEvent, OrderedLine};
use crate::domain::catalog::BusinessRef;
use crate::domain::ids::UserId;
use crate::metrics::ClientMetrics;

// ============================================================================
// Session Store - Context-scoped client state
// ============================================================================
//
// One store per signed-in session, passed to whatever needs it. Cart
// commands are decided and applied under a single lock, so two concurrent
// taps on "add" both land. Every applied event is journaled with its
// position in the session.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug)]
struct Session {
    id: Uuid,
    user: Option<SessionUser>,
    selected_business: Option<BusinessRef>,
    cart: CartAggregate,
    journal: Vec<EventEnvelope<CartEvent>>,
}

impl Session {
    fn new(user: Option<SessionUser>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            selected_business: None,
            cart: CartAggregate::new(),
            journal: Vec::new(),
        }
    }

    fn record(&mut self, events: &[CartEvent], metrics: &ClientMetrics) {
        for event in events {
            self.cart.apply_event(event);

            let sequence_number = self.journal.len() as u64 + 1;
            let envelope = EventEnvelope::new(self.id, sequence_number, event.clone());

            tracing::debug!(
                session_id = %self.id,
                sequence_number = sequence_number,
                event_type = %envelope.event_type,
                "Cart event applied"
            );

            metrics.record_cart_event(event.event_type());
            self.journal.push(envelope);
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Session>>,
    metrics: Arc<ClientMetrics>,
}

impl SessionStore {
    pub fn new(metrics: Arc<ClientMetrics>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Session::new(None))),
            metrics,
        }
    }

    /// Sign-in: a fresh session for `user`
    pub async fn start(&self, user: SessionUser) -> Uuid {
        let mut session = self.inner.lock().await;
        *session = Session::new(Some(user));

        tracing::info!(session_id = %session.id, user_id = ?session.user.as_ref().map(|user| &user.id), "Session started");
        session.id
    }

    /// Sign-out: drops the user, business selection, cart and journal
    pub async fn logout(&self) {
        let mut session = self.inner.lock().await;
        let previous = session.id;
        *session = Session::new(None);

        tracing::info!(previous_session_id = %previous, session_id = %session.id, "Session reset");
    }

    pub async fn session_id(&self) -> Uuid {
        self.inner.lock().await.id
    }

    pub async fn user(&self) -> Option<SessionUser> {
        self.inner.lock().await.user.clone()
    }

    pub async fn select_business(&self, business: BusinessRef) {
        let mut session = self.inner.lock().await;
        tracing::debug!(business_id = %business.id, "Business selected");
        session.selected_business = Some(business);
    }

    pub async fn selected_business(&self) -> Option<BusinessRef> {
        self.inner.lock().await.selected_business.clone()
    }

    /// Decide and apply one cart command atomically
    pub async fn dispatch(&self, command: CartCommand) -> Result<Vec<CartEvent>, CartError> {
        let mut session = self.inner.lock().await;
        let events = session.cart.handle_command(&command)?;
        session.record(&events, &self.metrics);
        Ok(events)
    }

    /// Point-in-time copy of the cart
    pub async fn cart(&self) -> CartAggregate {
        self.inner.lock().await.cart.clone()
    }

    pub async fn total_price(&self) -> Decimal {
        self.inner.lock().await.cart.total_price()
    }

    /// Take a placed order's lines out of the live cart
    ///
    /// Lines added or topped up after `lines` was captured stay in the cart.
    pub async fn remove_ordered(&self, lines: Vec<OrderedLine>) -> Vec<CartEvent> {
        self.dispatch(CartCommand::RemoveOrdered { lines })
            .await
            .unwrap_or_default()
    }

    pub async fn clear_cart(&self) -> Vec<CartEvent> {
        // Clear never fails; an empty cart yields no events
        self.dispatch(CartCommand::Clear).await.unwrap_or_default()
    }

    /// Journal of applied cart events, oldest first
    pub async fn history(&self) -> Vec<EventEnvelope<CartEvent>> {
        self.inner.lock().await.journal.clone()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::{CartProduct, CartVariant};
    use crate::domain::ids::{BusinessId, ProductId, VariantId};
    use std::str::FromStr;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(ClientMetrics::new().unwrap()))
    }

    fn add(variant: &str, price: &str, quantity: u32) -> CartCommand {
        CartCommand::AddItem {
            product: CartProduct {
                product_id: ProductId::new("p1"),
                name: "Palm oil".to_string(),
                business_id: BusinessId::new("s1"),
                supplier_business_id: BusinessId::new("s1"),
                supplier_name: "Coop".to_string(),
                image_url: None,
            },
            variant: CartVariant {
                id: VariantId::new(variant),
                name: "1L".to_string(),
                price: Decimal::from_str(price).unwrap(),
            },
            quantity,
        }
    }

    #[tokio::test]
    async fn test_dispatch_journals_events_in_order() {
        let store = store();
        store.dispatch(add("v1", "10.00", 2)).await.unwrap();
        store
            .dispatch(CartCommand::UpdateQuantity {
                variant_id: VariantId::new("v1"),
                delta: 1,
            })
            .await
            .unwrap();

        let history = store.history().await;
        let session_id = store.session_id().await;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].event_type, "CartItemAdded");
        assert_eq!(history[1].event_type, "CartQuantityChanged");
        assert_eq!(history[0].sequence_number, 1);
        assert_eq!(history[1].sequence_number, 2);
        assert!(history.iter().all(|envelope| envelope.session_id == session_id));
        assert_eq!(store.total_price().await, Decimal::from_str("30.00").unwrap());
    }

    #[tokio::test]
    async fn test_rejected_command_changes_nothing() {
        let store = store();
        let result = store.dispatch(add("v1", "10.00", 0)).await;

        assert_eq!(result, Err(CartError::InvalidQuantity(0)));
        assert!(store.cart().await.is_empty());
        assert!(store.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let store = store();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.dispatch(add("v1", "1.00", 1)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let cart = store.cart().await;
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 50);
        assert_eq!(store.history().await.len(), 50);
    }

    #[tokio::test]
    async fn test_logout_resets_everything() {
        let store = store();
        let first = store
            .start(SessionUser {
                id: UserId::new("u1"),
                name: "Ama".to_string(),
            })
            .await;
        store
            .select_business(BusinessRef {
                id: BusinessId::new("b1"),
                name: "Corner shop".to_string(),
                kind: None,
            })
            .await;
        store.dispatch(add("v1", "2.50", 1)).await.unwrap();

        store.logout().await;

        assert_ne!(store.session_id().await, first);
        assert!(store.user().await.is_none());
        assert!(store.selected_business().await.is_none());
        assert!(store.cart().await.is_empty());
        assert!(store.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_cart_on_empty_cart_is_quiet() {
        let store = store();
        assert!(store.clear_cart().await.is_empty());

        store.dispatch(add("v1", "2.50", 1)).await.unwrap();
        let events = store.clear_cart().await;
        assert_eq!(events.len(), 1);
        assert!(store.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_ordered_journals_only_ordered_lines() {
        let store = store();
        store.dispatch(add("v1", "2.50", 2)).await.unwrap();
        let ordered = store.cart().await.ordered_lines();
        store.dispatch(add("v2", "1.00", 1)).await.unwrap();

        let events = store.remove_ordered(ordered).await;

        assert_eq!(events.len(), 1);
        assert_eq!(store.cart().await.ordered_lines(), vec![OrderedLine {
            variant_id: VariantId::new("v2"),
            quantity: 1,
        }]);
        assert_eq!(store.history().await.last().unwrap().event_type, "CartItemRemoved");
    }
}
