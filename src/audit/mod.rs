//! Audit trail for back-office records
//!
//! Every create, update and delete of an expense, invoice or service order is
//! appended to `audit.log` as a JSON line with before/after snapshots, so a
//! changed amount can always be traced back.
//!
//! - `AuditEntry`: one recorded operation
//! - `AuditLogger`: JSONL reader/writer
//! - `generate_diff`: human summary of what changed

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
