//! Msig-Wallet: a quorum-approval custodial wallet in Rust
//!
//! This crate provides a multi-owner wallet featuring:
//! - A fixed owner set and approval threshold established at creation
//! - An append-only transaction ledger with dense sequence ids
//! - Per-owner approval and revocation bookkeeping
//! - Quorum-triggered, all-or-nothing execution of fund transfers
//! - Deterministic P2SH-style wallet addresses
//! - JSON persistence and a CLI for operating a wallet on disk
//!
//! # Example
//!
//! ```rust
//! use msig_wallet::funds::CreditLedger;
//! use msig_wallet::MultisigWallet;
//!
//! // Create a 2-of-3 wallet
//! let mut wallet = MultisigWallet::new(
//!     vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
//!     2,
//! ).unwrap();
//! let mut outlet = CreditLedger::new();
//!
//! wallet.deposit(10_000);
//!
//! // Any owner may propose a transfer
//! let id = wallet.propose_transaction("alice", "dave", 2_500, vec![]).unwrap();
//!
//! // The approval completing the quorum executes it in the same call
//! wallet.approve_transaction("alice", id, &mut outlet).unwrap();
//! let outcome = wallet.approve_transaction("carol", id, &mut outlet).unwrap();
//! assert!(outcome.executed);
//! assert_eq!(wallet.balance(), 7_500);
//! ```

pub mod cli;
pub mod funds;
pub mod ledger;
pub mod storage;
pub mod wallet;

// Re-export commonly used types
pub use funds::{CreditLedger, FundsOutlet, TransferError, Vault};
pub use ledger::{ApprovalTracker, EntryStore, TransactionEntry};
pub use storage::{StorageConfig, WalletState, WalletStore};
pub use wallet::{ApprovalOutcome, MultisigWallet, OwnerRegistry, WalletError, WalletEvent};
