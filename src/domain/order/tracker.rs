use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::value_objects::Order;
use crate::api::{ApiError, OrdersApi};
use crate::domain::ids::OrderId;

// ============================================================================
// Order Tracker
// ============================================================================
//
// Status changes are never pushed; the client re-fetches. Each poll is a
// plain `get_order`, so it runs under the read retry policy.
//
// ============================================================================

pub struct OrderTracker {
    orders: Arc<dyn OrdersApi>,
}

impl OrderTracker {
    pub fn new(orders: Arc<dyn OrdersApi>) -> Self {
        Self { orders }
    }

    /// Poll until the order reaches a terminal status or `max_polls` fetches
    /// have been made; returns the last order seen
    pub async fn watch(
        &self,
        order_id: &OrderId,
        interval: Duration,
        max_polls: u32,
    ) -> Result<Order, ApiError> {
        let max_polls = max_polls.max(1);
        let mut order = self.orders.get_order(order_id).await?;

        tracing::info!(order_id = %order_id, status = %order.status, "Watching order");

        for poll in 2..=max_polls {
            if order.status.is_terminal() {
                break;
            }

            sleep(interval).await;
            let latest = self.orders.get_order(order_id).await?;

            if latest.status != order.status {
                tracing::info!(
                    order_id = %order_id,
                    poll = poll,
                    from = %order.status,
                    to = %latest.status,
                    "🔄 Order status changed"
                );
            }
            order = latest;
        }

        if !order.status.is_terminal() {
            tracing::debug!(order_id = %order_id, status = %order.status, "Poll budget spent");
        }

        Ok(order)
    }
}
