//! Multi-owner custodial wallet
//!
//! Funds held by a wallet are released only after a quorum of owners has
//! approved a specific transaction.
//!
//! # Example
//!
//! ```
//! use msig_wallet::funds::CreditLedger;
//! use msig_wallet::wallet::MultisigWallet;
//!
//! let mut wallet = MultisigWallet::new(
//!     vec!["alice".to_string(), "bob".to_string()],
//!     2,
//! ).unwrap();
//! let mut outlet = CreditLedger::new();
//!
//! wallet.deposit(1_000);
//!
//! // Any owner may propose; funds move once the quorum approves
//! let id = wallet.propose_transaction("alice", "carol", 400, vec![]).unwrap();
//! wallet.approve_transaction("alice", id, &mut outlet).unwrap();
//! let outcome = wallet.approve_transaction("bob", id, &mut outlet).unwrap();
//!
//! assert!(outcome.executed);
//! assert_eq!(wallet.balance(), 600);
//! ```

pub mod registry;
pub mod wallet;

pub use registry::{OwnerRegistry, WalletError};
pub use wallet::{ApprovalOutcome, MultisigWallet, WalletEvent};
