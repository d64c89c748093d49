use rust_decimal::Decimal;

use crate::api::PageMeta;
use crate::domain::analytics::ChartData;
use crate::domain::catalog::{BusinessRef, Product};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::payment::PaymentIntent;
use crate::domain::wallet::{Transaction, Wallet};

// ============================================================================
// Terminal Rendering
// ============================================================================
//
// Plain text tables on stdout. Logs go to stderr so output stays pipeable.
// Every status is shown through its badge.
//
// ============================================================================

pub fn status_cell(status: OrderStatus) -> String {
    let badge = status.badge();
    format!("{} [{}]", badge.label, status)
}

pub fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

pub fn page_footer(meta: &PageMeta) {
    println!(
        "page {}/{} · {} total",
        meta.page,
        meta.total_pages.max(1),
        meta.total
    );
}

pub fn orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }

    println!("{:<14} {:<30} {:>12}  {}", "ORDER", "STATUS", "TOTAL", "CREATED");
    for order in orders {
        println!(
            "{:<14} {:<30} {:>12}  {}",
            order.reference(),
            status_cell(order.status),
            money(order.total_amount),
            order.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}

pub fn order(order: &Order) {
    let badge = order.status.badge();

    println!("Order     {} ({})", order.reference(), order.id);
    println!(
        "Status    {} (text {}, background {})",
        badge.label, badge.text_color, badge.background_color
    );
    println!("Total     {}", money(order.total_amount));
    println!("Created   {}", order.created_at.to_rfc3339());
    if let Some(business) = &order.business {
        println!("Business  {}", business.name.as_deref().unwrap_or(&business.id));
    }
    if let Some(customer) = &order.customer {
        println!("Customer  {}", customer.name.as_deref().unwrap_or(&customer.id));
    }
    if let Some(notes) = &order.notes {
        println!("Notes     {notes}");
    }

    if !order.lines.is_empty() {
        println!();
        println!("{:<24} {:>6} {:>12}", "VARIANT", "QTY", "PRICE");
        for line in &order.lines {
            println!("{:<24} {:>6} {:>12}", line.variant_id, line.quantity, money(line.price));
        }
    }
}

pub fn placed(order: &Order, intent: &PaymentIntent) {
    println!(
        "Order {} placed: {}, total {}",
        order.reference(),
        order.status.badge().label,
        money(order.total_amount)
    );
    println!("Payment intent {} ({})", intent.id, intent.status);
    if let Some(url) = &intent.redirect_url {
        println!("Complete payment at {url}");
    }
    if let Some(secret) = &intent.client_secret {
        println!("Client secret {secret}");
    }
}

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }

    println!("{:<14} {:<32} {:>8} {:>12}", "ID", "NAME", "VARIANTS", "FROM");
    for product in products {
        println!(
            "{:<14} {:<32} {:>8} {:>12}",
            product.id,
            product.name,
            product.variants.len(),
            product.starting_price().map(money).unwrap_or_else(|| "-".to_string())
        );
    }
}

pub fn product(product: &Product) {
    println!("{} ({})", product.name, product.id);
    if let Some(description) = &product.description {
        println!("{description}");
    }
    if let Some(business) = &product.business {
        println!("Sold by {} ({})", business.name, business.id);
    }

    println!();
    println!("{:<14} {:<24} {:>12} {:>8}", "VARIANT", "NAME", "PRICE", "STOCK");
    for variant in &product.variants {
        println!(
            "{:<14} {:<24} {:>12} {:>8}",
            variant.id,
            variant.name,
            money(variant.price),
            variant.stock.map(|stock| stock.to_string()).unwrap_or_else(|| "-".to_string())
        );
    }
}

pub fn businesses(businesses: &[BusinessRef]) {
    println!("{:<14} {:<32} {}", "ID", "NAME", "TYPE");
    for business in businesses {
        println!(
            "{:<14} {:<32} {}",
            business.id,
            business.name,
            business
                .kind
                .map(|kind| format!("{kind:?}"))
                .unwrap_or_else(|| "-".to_string())
        );
    }
}

pub fn wallet(wallet: &Wallet) {
    println!("Balance {} {}", money(wallet.balance), wallet.currency);
}

pub fn transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions.");
        return;
    }

    println!("{:<17} {:<14} {:>12} {:<10} {}", "DATE", "TYPE", "AMOUNT", "STATUS", "DESCRIPTION");
    for transaction in transactions {
        println!(
            "{:<17} {:<14} {:>12} {:<10} {}",
            transaction.created_at.format("%Y-%m-%d %H:%M"),
            format!("{:?}", transaction.transaction_type),
            money(transaction.signed_amount()),
            format!("{:?}", transaction.status),
            transaction.description.as_deref().unwrap_or("")
        );
    }
}

pub fn chart(chart: &ChartData) {
    if chart.labels.is_empty() {
        println!("No data.");
        return;
    }

    let header: Vec<&str> = chart.datasets.iter().map(|dataset| dataset.label.as_str()).collect();
    println!("{:<16} {}", "", header.iter().map(|label| format!("{label:>14}")).collect::<String>());

    for (label, values) in chart.rows() {
        let cells: String = values.into_iter().map(|value| format!("{:>14}", money(value))).collect();
        println!("{label:<16} {cells}");
    }

    let totals: String = chart
        .totals()
        .into_iter()
        .map(|(_, total)| format!("{:>14}", money(total)))
        .collect();
    println!("{:<16} {totals}", "TOTAL");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(Decimal::new(2, 0)), "2.00");
        assert_eq!(money(Decimal::new(12346, 3)), "12.35");
    }

    #[test]
    fn test_status_cell_uses_badge_label() {
        assert_eq!(status_cell(OrderStatus::PendingPayment), "Awaiting payment [PENDING_PAYMENT]");
        assert_eq!(status_cell(OrderStatus::Unknown), "Unknown [UNKNOWN]");
    }
}
