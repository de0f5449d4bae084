//! Service order service
//!
//! Opens service orders and applies item and markup changes to them.

use crate::error::{CaixaError, CaixaResult};
use crate::models::{
    CostItem, Costing, NewServiceOrder, ServiceOrder, ServiceOrderChange,
};

use super::expense::checked_amount;
use crate::storage::Storage;

/// Service for service order management
pub struct ServiceOrderService<'a> {
    storage: &'a Storage,
}

impl<'a> ServiceOrderService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Open a new service order with no items
    pub fn create(&self, input: NewServiceOrder) -> CaixaResult<ServiceOrder> {
        let number = input.number.trim();
        if self.storage.service_orders.find(number)?.is_some() {
            return Err(CaixaError::Validation(format!(
                "Service order '{}' already exists",
                number
            )));
        }

        let order = ServiceOrder::new(number, input.client.trim(), input.opened_on, input.markup_rate);
        order
            .validate()
            .map_err(|e| CaixaError::Validation(e.to_string()))?;

        self.storage.service_orders.upsert(order.clone())?;
        self.storage.service_orders.save()?;
        self.storage.log_create(&order)?;

        tracing::info!(id = %order.id, number = %order.number, "service order created");
        Ok(order)
    }

    /// Find a service order by ID or number
    pub fn find(&self, identifier: &str) -> CaixaResult<Option<ServiceOrder>> {
        self.storage.service_orders.find(identifier)
    }

    fn require(&self, identifier: &str) -> CaixaResult<ServiceOrder> {
        self.find(identifier)?
            .ok_or_else(|| CaixaError::service_order_not_found(identifier))
    }

    /// All service orders, most recently opened first
    pub fn list(&self) -> CaixaResult<Vec<ServiceOrder>> {
        self.storage.service_orders.get_all()
    }

    /// Cost, price and margin of a service order
    pub fn costing(&self, identifier: &str) -> CaixaResult<Costing> {
        Ok(self.require(identifier)?.costing())
    }

    /// Apply one change to a service order
    pub fn apply(&self, identifier: &str, change: ServiceOrderChange) -> CaixaResult<ServiceOrder> {
        let mut order = self.require(identifier)?;
        let before = order.clone();

        match change {
            ServiceOrderChange::AddItem(item) => {
                let unit_cost = checked_amount("unit cost", &item.unit_cost)?;
                order
                    .items
                    .push(CostItem::new(item.description.trim(), item.quantity, unit_cost));
            }
            ServiceOrderChange::RemoveItem(index) => {
                if index >= order.items.len() {
                    return Err(CaixaError::Validation(format!(
                        "Service order '{}' has no item #{}",
                        order.number,
                        index + 1
                    )));
                }
                order.items.remove(index);
            }
            ServiceOrderChange::SetMarkup(rate) => order.markup_rate = rate,
        }

        order.touch();
        order
            .validate()
            .map_err(|e| CaixaError::Validation(e.to_string()))?;

        self.storage.service_orders.upsert(order.clone())?;
        self.storage.service_orders.save()?;
        self.storage.log_update(&before, &order)?;

        tracing::info!(
            id = %order.id,
            items = order.items.len(),
            cost = %order.total_cost(),
            "service order updated"
        );
        Ok(order)
    }
}
