//! Service order model
//!
//! A service order ("ordem de serviço") collects the cost items consumed by a
//! job. Its price is the total cost times a markup rate, so costing is a
//! chain of multiply, sum and subtract on cents.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ServiceOrderId;
use crate::money::Amount;

/// One cost line: a quantity of something at a unit cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub description: String,
    pub quantity: f64,
    pub unit_cost: Amount,
}

impl CostItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_cost: Amount) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_cost,
        }
    }

    /// Unit cost times quantity, rounded once to the cent
    pub fn line_cost(&self) -> Amount {
        self.unit_cost.mul_rate(self.quantity)
    }
}

/// Cost, price and margin of a service order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Costing {
    pub cost: Amount,
    pub price: Amount,
    pub margin: Amount,
}

/// Raw cost item as entered
#[derive(Debug, Clone)]
pub struct NewCostItem {
    pub description: String,
    pub quantity: f64,
    pub unit_cost: String,
}

/// Payload for opening a service order
#[derive(Debug, Clone)]
pub struct NewServiceOrder {
    pub number: String,
    pub client: String,
    pub opened_on: NaiveDate,
    pub markup_rate: f64,
}

/// A single change to a service order
#[derive(Debug, Clone)]
pub enum ServiceOrderChange {
    AddItem(NewCostItem),
    /// Zero-based position of the item to drop
    RemoveItem(usize),
    SetMarkup(f64),
}

/// A service order with its cost items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOrder {
    /// Unique identifier
    pub id: ServiceOrderId,

    /// Business number printed on the order ("OS-2025-014")
    pub number: String,

    /// Client the work is done for
    pub client: String,

    /// Date the order was opened
    pub opened_on: NaiveDate,

    /// Cost items consumed
    #[serde(default)]
    pub items: Vec<CostItem>,

    /// Price multiplier over cost (1.3 = 30% markup)
    #[serde(default = "default_markup")]
    pub markup_rate: f64,

    /// When the order was created
    pub created_at: DateTime<Utc>,

    /// When the order was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_markup() -> f64 {
    1.0
}

impl ServiceOrder {
    /// Open a new service order with no items
    pub fn new(
        number: impl Into<String>,
        client: impl Into<String>,
        opened_on: NaiveDate,
        markup_rate: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ServiceOrderId::new(),
            number: number.into(),
            client: client.into(),
            opened_on,
            items: Vec::new(),
            markup_rate,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total cost of all items
    pub fn total_cost(&self) -> Amount {
        self.items.iter().map(CostItem::line_cost).sum()
    }

    /// Cost, marked-up price and margin
    pub fn costing(&self) -> Costing {
        let cost = self.total_cost();
        let price = cost.mul_rate(self.markup_rate);
        Costing {
            cost,
            price,
            margin: price - cost,
        }
    }

    /// Validate the order
    pub fn validate(&self) -> Result<(), ServiceOrderValidationError> {
        if self.number.trim().is_empty() {
            return Err(ServiceOrderValidationError::EmptyNumber);
        }

        if self.client.trim().is_empty() {
            return Err(ServiceOrderValidationError::EmptyClient);
        }

        if !self.markup_rate.is_finite() || self.markup_rate < 0.0 {
            return Err(ServiceOrderValidationError::InvalidMarkup(self.markup_rate));
        }

        for item in &self.items {
            if !item.quantity.is_finite() || item.quantity <= 0.0 {
                return Err(ServiceOrderValidationError::InvalidQuantity(
                    item.description.clone(),
                ));
            }
        }

        Ok(())
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validation errors for service orders
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOrderValidationError {
    EmptyNumber,
    EmptyClient,
    InvalidMarkup(f64),
    InvalidQuantity(String),
}

impl fmt::Display for ServiceOrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "Service order number cannot be empty"),
            Self::EmptyClient => write!(f, "Service order client cannot be empty"),
            Self::InvalidMarkup(rate) => {
                write!(f, "Markup rate must be a non-negative number (got {})", rate)
            }
            Self::InvalidQuantity(desc) => {
                write!(f, "Quantity for '{}' must be greater than zero", desc)
            }
        }
    }
}

impl std::error::Error for ServiceOrderValidationError {}
