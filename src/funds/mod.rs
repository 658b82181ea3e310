//! Funds custody and movement
//!
//! The vault holding the wallet's balance and the execution engine that
//! releases it once quorum is reached.

pub mod execution;
pub mod vault;

pub use execution::{try_execute, CreditLedger, Delivery, FundsOutlet};
pub use vault::{TransferError, Vault};
