//! Service layer for caixa
//!
//! The service layer provides business logic on top of the storage layer:
//! raw monetary input is checked with the strict validator before it becomes
//! an `Amount`, every change is saved and written to the audit log.

pub mod expense;
pub mod invoice;
pub mod service_order;

pub use expense::{parse_month, ExpenseFilter, ExpenseService};
pub use invoice::InvoiceService;
pub use service_order::ServiceOrderService;
