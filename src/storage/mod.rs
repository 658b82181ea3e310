//! Persistence for wallet state

pub mod persistence;

pub use persistence::{StorageConfig, StorageError, WalletState, WalletStore};
