//! Core data models for caixa
//!
//! The back-office entities: expenses, supplier invoices and service orders.
//! Every monetary field is an [`Amount`](crate::money::Amount).

pub mod expense;
pub mod ids;
pub mod invoice;
pub mod service_order;

pub use expense::{Expense, ExpenseUpdate, NewExpense};
pub use ids::{ExpenseId, InvoiceId, ServiceOrderId};
pub use invoice::{Invoice, InvoiceLine, InvoiceStatus, NewInvoice, NewInvoiceLine, Payment};
pub use service_order::{
    CostItem, Costing, NewCostItem, NewServiceOrder, ServiceOrder, ServiceOrderChange,
};
