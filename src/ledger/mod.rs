//! Transaction ledger
//!
//! The append-only entry store and the per-entry approval relation.

pub mod approvals;
pub mod entry;

pub use approvals::ApprovalTracker;
pub use entry::{EntryStore, TransactionEntry};
