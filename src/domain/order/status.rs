use super::value_objects::OrderStatus;

// ============================================================================
// Status Presentation
// ============================================================================
//
// The one status -> badge table every list, detail and CLI view reads.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub text_color: &'static str,
    pub background_color: &'static str,
}

impl OrderStatus {
    pub fn badge(&self) -> StatusBadge {
        let (label, text_color, background_color) = match self {
            OrderStatus::PendingPayment => ("Awaiting payment", "#92400E", "#FEF3C7"),
            OrderStatus::Pending => ("Pending", "#854D0E", "#FEF9C3"),
            OrderStatus::Confirmed => ("Confirmed", "#1E40AF", "#DBEAFE"),
            OrderStatus::Processing => ("Processing", "#5B21B6", "#EDE9FE"),
            OrderStatus::Shipped => ("Shipped", "#3730A3", "#E0E7FF"),
            OrderStatus::Delivered => ("Delivered", "#166534", "#DCFCE7"),
            OrderStatus::Completed => ("Completed", "#065F46", "#D1FAE5"),
            OrderStatus::Cancelled => ("Cancelled", "#991B1B", "#FEE2E2"),
            OrderStatus::Paid => ("Paid", "#0F766E", "#CCFBF1"),
            OrderStatus::Refunded => ("Refunded", "#9D174D", "#FCE7F3"),
            OrderStatus::Unknown => ("Unknown", "#374151", "#F3F4F6"),
        };

        StatusBadge {
            label,
            text_color,
            background_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_status_has_a_distinct_label() {
        let labels: HashSet<_> = OrderStatus::ALL.iter().map(|status| status.badge().label).collect();
        assert_eq!(labels.len(), OrderStatus::ALL.len());
        assert!(!labels.contains("Unknown"));
    }

    #[test]
    fn test_paid_and_refunded_are_covered() {
        assert_eq!(OrderStatus::Paid.badge().label, "Paid");
        assert_eq!(OrderStatus::Refunded.badge().label, "Refunded");
    }

    #[test]
    fn test_unknown_falls_back_to_neutral() {
        let badge = OrderStatus::Unknown.badge();
        assert_eq!(badge.label, "Unknown");
        assert_eq!(badge.background_color, "#F3F4F6");
    }

    #[test]
    fn test_colors_are_hex() {
        for status in OrderStatus::ALL {
            let badge = status.badge();
            for color in [badge.text_color, badge.background_color] {
                assert_eq!(color.len(), 7, "{status}: {color}");
                assert!(color.starts_with('#'));
                assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }
}
