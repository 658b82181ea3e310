//! Wallet persistence layer
//!
//! Provides save/load functionality for a wallet and its credit ledger.

use crate::funds::CreditLedger;
use crate::wallet::MultisigWallet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Everything persisted for one wallet instance
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WalletState {
    pub wallet: MultisigWallet,
    pub credits: CreditLedger,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub wallet_file: String,
    pub backup_enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".msigwallet_data"),
            wallet_file: "wallet.json".to_string(),
            backup_enabled: true,
        }
    }
}

/// Wallet storage manager
pub struct WalletStore {
    config: StorageConfig,
}

impl WalletStore {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the wallet file path
    fn wallet_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.wallet_file)
    }

    /// Get the backup file path
    fn backup_path(&self) -> std::path::PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup", self.config.wallet_file))
    }

    /// Save the wallet state to disk
    pub fn save(&self, state: &WalletState) -> Result<(), StorageError> {
        let path = self.wallet_path();

        if self.config.backup_enabled && path.exists() {
            fs::copy(&path, self.backup_path())?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("wallet.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, state)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Load the wallet state from disk
    pub fn load(&self) -> Result<WalletState, StorageError> {
        let path = self.wallet_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Wallet file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        Ok(serde_json::from_reader(reader)?)
    }

    /// Check if a saved wallet exists
    pub fn exists(&self) -> bool {
        self.wallet_path().exists()
    }

    /// Delete the saved wallet
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.wallet_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> WalletStore {
        WalletStore::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..Default::default()
        })
        .unwrap()
    }

    fn sample_state() -> WalletState {
        let mut wallet = MultisigWallet::new(
            vec!["alice".to_string(), "bob".to_string()],
            2,
        )
        .unwrap();
        let mut credits = CreditLedger::new();
        wallet.deposit(5_000);
        let id = wallet
            .propose_transaction("alice", "dest", 1_000, vec![1, 2, 3])
            .unwrap();
        wallet.approve_transaction("alice", id, &mut credits).unwrap();

        WalletState { wallet, credits }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let state = sample_state();

        assert!(!store.exists());
        store.save(&state).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.wallet.address(), state.wallet.address());
        assert_eq!(loaded.wallet.balance(), 5_000);
        assert_eq!(loaded.wallet.transaction_count(), 1);
        assert!(loaded.wallet.is_approved_by(0, "alice"));
        assert_eq!(
            loaded.wallet.transaction(0).unwrap().payload,
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(matches!(store.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_loaded_wallet_resumes_operation() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample_state()).unwrap();

        // The quorum completes across a save/load boundary
        let mut state = store.load().unwrap();
        let outcome = state
            .wallet
            .approve_transaction("bob", 0, &mut state.credits)
            .unwrap();
        assert!(outcome.executed);
        assert_eq!(state.wallet.balance(), 4_000);
        assert_eq!(state.credits.credit_of("dest"), 1_000);
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&sample_state()).unwrap();

        store.delete().unwrap();
        assert!(!store.exists());
    }
}
