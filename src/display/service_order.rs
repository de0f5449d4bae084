//! Service order display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{truncate, DisplayStyle};
use crate::models::ServiceOrder;

#[derive(Tabled)]
struct ServiceOrderRow {
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Opened")]
    opened: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Format a list of service orders as a table
pub fn format_service_order_list(orders: &[ServiceOrder], style: DisplayStyle) -> String {
    if orders.is_empty() {
        return "No service orders found.".to_string();
    }

    let rows = orders.iter().map(|o| {
        let costing = o.costing();
        ServiceOrderRow {
            number: o.number.clone(),
            client: truncate(&o.client, 30),
            opened: style.date(o.opened_on),
            items: o.items.len(),
            cost: style.money(costing.cost),
            price: style.money(costing.price),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a service order with its numbered items and costing
pub fn format_service_order_details(order: &ServiceOrder, style: DisplayStyle) -> String {
    let mut output = String::new();

    output.push_str(&format!("Service order: {}\n", order.number));
    output.push_str(&format!("  ID:          {}\n", order.id));
    output.push_str(&format!("  Client:      {}\n", order.client));
    output.push_str(&format!("  Opened:      {}\n", style.date(order.opened_on)));
    output.push_str(&format!("  Markup:      x{}\n", order.markup_rate));

    output.push_str("\nItems:\n");
    if order.items.is_empty() {
        output.push_str("  (none)\n");
    }
    for (i, item) in order.items.iter().enumerate() {
        output.push_str(&format!(
            "  {:>2}. {:<30} {:>8} x {:>12} = {:>14}\n",
            i + 1,
            truncate(&item.description, 30),
            item.quantity,
            style.money(item.unit_cost),
            style.money(item.line_cost())
        ));
    }

    let costing = order.costing();
    output.push('\n');
    output.push_str(&format!("  {:<20} {:>14}\n", "Cost", style.money(costing.cost)));
    output.push_str(&format!("  {:<20} {:>14}\n", "Price", style.money(costing.price)));
    output.push_str(&format!("  {:<20} {:>14}\n", "Margin", style.money(costing.margin)));

    output
}
