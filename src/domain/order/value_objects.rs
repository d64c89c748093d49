use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ids::{OrderId, VariantId};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Server-defined order lifecycle state; transitions are server-authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Completed,
    Cancelled,
    Paid,
    Refunded,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 10] = [
        OrderStatus::PendingPayment,
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Paid,
        OrderStatus::Refunded,
    ];

    /// Wire name, as sent in query strings and status updates
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "PENDING_PAYMENT",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Refunded => "REFUNDED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// No further status change is expected
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::Completed
                | OrderStatus::Cancelled
                | OrderStatus::Refunded
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown order status: {value}"))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub variant_id: VariantId,
    pub quantity: u32,
    pub price: Decimal,
}

/// Customer or business as embedded in an order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderParty {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Read-mostly copy of a backend order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub customer: Option<OrderParty>,
    #[serde(default)]
    pub business: Option<OrderParty>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Order {
    /// Human-facing reference, falling back to the id
    pub fn reference(&self) -> &str {
        if self.order_number.is_empty() {
            self.id.as_str()
        } else {
            &self.order_number
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"PENDING_PAYMENT\"");

        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_unrecognised_status_becomes_unknown() {
        let status: OrderStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }

    #[test]
    fn test_status_from_str_is_lenient() {
        assert_eq!(OrderStatus::from_str("cancelled"), Ok(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::from_str("pending-payment"), Ok(OrderStatus::PendingPayment));
        assert!(OrderStatus::from_str("unknown").is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = OrderStatus::ALL.into_iter().filter(OrderStatus::is_terminal).collect();
        assert_eq!(
            terminal,
            vec![
                OrderStatus::Delivered,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
                OrderStatus::Refunded
            ]
        );
    }

    #[test]
    fn test_order_deserialization() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "orderNumber": "ORD-0001",
            "status": "SHIPPED",
            "totalAmount": "42.50",
            "lines": [{ "variantId": "v1", "quantity": 5, "price": "8.50" }],
            "customer": { "id": "u1", "name": "Ama" },
            "business": { "id": "b1" },
            "createdAt": "2026-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(order.reference(), "ORD-0001");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total_amount, Decimal::from_str("42.50").unwrap());
        assert_eq!(order.lines[0].quantity, 5);
        assert_eq!(order.business.unwrap().name, None);
        assert!(order.notes.is_none());
    }

    #[test]
    fn test_numeric_amounts_accepted() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o2",
            "status": "PENDING",
            "totalAmount": 12.5,
            "createdAt": "2026-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(order.total_amount, Decimal::from_str("12.5").unwrap());
        assert_eq!(order.reference(), "o2");
        assert!(order.lines.is_empty());
    }
}
