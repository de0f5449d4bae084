//! Service order CLI commands

use clap::Subcommand;

use super::parse_date_or_today;
use crate::config::Settings;
use crate::display::{format_service_order_details, format_service_order_list, DisplayStyle};
use crate::error::{CaixaError, CaixaResult};
use crate::models::{NewCostItem, NewServiceOrder, ServiceOrderChange};
use crate::services::ServiceOrderService;
use crate::storage::Storage;

/// Service order subcommands
#[derive(Subcommand)]
pub enum OrderCommands {
    /// Open a service order
    Add {
        /// Order number, e.g. "OS-2025-014"
        number: String,
        client: String,
        /// Price multiplier over cost (1.3 = 30% markup)
        #[arg(short, long, default_value_t = 1.0)]
        markup: f64,
        /// Opening date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Add a cost item to an order
    Item {
        /// Order number or ID
        order: String,
        description: String,
        /// Unit cost, e.g. "3,99"
        unit_cost: String,
        #[arg(short, long, default_value_t = 1.0)]
        quantity: f64,
    },
    /// Remove a cost item by its position (as shown by `order show`)
    RemoveItem { order: String, position: usize },
    /// Change the markup rate
    Markup { order: String, rate: f64 },
    /// List service orders
    List,
    /// Show an order with its costing
    Show { order: String },
}

/// Handle a service order command
pub fn handle_order_command(
    storage: &Storage,
    settings: &Settings,
    cmd: OrderCommands,
) -> CaixaResult<()> {
    let service = ServiceOrderService::new(storage);
    let style = DisplayStyle::from_settings(settings);

    match cmd {
        OrderCommands::Add {
            number,
            client,
            markup,
            date,
        } => {
            let order = service.create(NewServiceOrder {
                number,
                client,
                opened_on: parse_date_or_today(date.as_deref())?,
                markup_rate: markup,
            })?;
            println!("Opened service order {} for {}", order.number, order.client);
        }
        OrderCommands::Item {
            order,
            description,
            unit_cost,
            quantity,
        } => {
            let order = service.apply(
                &order,
                ServiceOrderChange::AddItem(NewCostItem {
                    description,
                    quantity,
                    unit_cost,
                }),
            )?;
            println!(
                "{}: {} item(s), cost {}",
                order.number,
                order.items.len(),
                style.money(order.total_cost())
            );
        }
        OrderCommands::RemoveItem { order, position } => {
            let index = position.checked_sub(1).ok_or_else(|| {
                CaixaError::Validation("Item positions start at 1".into())
            })?;
            let order = service.apply(&order, ServiceOrderChange::RemoveItem(index))?;
            println!(
                "{}: {} item(s), cost {}",
                order.number,
                order.items.len(),
                style.money(order.total_cost())
            );
        }
        OrderCommands::Markup { order, rate } => {
            let order = service.apply(&order, ServiceOrderChange::SetMarkup(rate))?;
            println!(
                "{}: price {}",
                order.number,
                style.money(order.costing().price)
            );
        }
        OrderCommands::List => {
            let orders = service.list()?;
            println!("{}", format_service_order_list(&orders, style));
        }
        OrderCommands::Show { order } => {
            let order = service
                .find(&order)?
                .ok_or_else(|| CaixaError::service_order_not_found(&order))?;
            print!("{}", format_service_order_details(&order, style));
        }
    }

    Ok(())
}
