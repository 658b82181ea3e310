//! Transaction ledger entries
//!
//! Each proposed fund movement is recorded as one entry, identified by a
//! dense sequence number. Entries are never deleted; an executed entry
//! remains queryable as an audit record.

use crate::wallet::WalletError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One proposed fund movement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionEntry {
    /// Identity receiving the funds
    pub destination: String,
    /// Amount of the wallet's native balance to transfer
    pub value: u128,
    /// Opaque bytes passed to the destination on execution
    pub payload: Vec<u8>,
    /// Set exactly once, by the execution engine; never reset
    pub executed: bool,
    /// Number of distinct owners currently approving
    pub approvals: u32,
    /// When the entry was proposed
    pub created_at: DateTime<Utc>,
    /// When the entry was executed, if it has been
    pub executed_at: Option<DateTime<Utc>>,
}

impl TransactionEntry {
    fn new(destination: String, value: u128, payload: Vec<u8>) -> Self {
        Self {
            destination,
            value,
            payload,
            executed: false,
            approvals: 0,
            created_at: Utc::now(),
            executed_at: None,
        }
    }
}

/// Append-only store of ledger entries
///
/// Sequence ids are zero-based, assigned in creation order, and never
/// reused.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntryStore {
    entries: Vec<TransactionEntry>,
}

impl EntryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a new entry and return its sequence id
    pub fn create(&mut self, destination: String, value: u128, payload: Vec<u8>) -> u64 {
        let entry_id = self.entries.len() as u64;
        self.entries
            .push(TransactionEntry::new(destination, value, payload));
        entry_id
    }

    /// Get an entry by id
    pub fn get(&self, entry_id: u64) -> Result<&TransactionEntry, WalletError> {
        self.entries
            .get(entry_id as usize)
            .ok_or(WalletError::UnknownEntry(entry_id))
    }

    /// Get a mutable reference to an entry
    pub fn get_mut(&mut self, entry_id: u64) -> Result<&mut TransactionEntry, WalletError> {
        self.entries
            .get_mut(entry_id as usize)
            .ok_or(WalletError::UnknownEntry(entry_id))
    }

    /// Number of entries ever created
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries exist
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries with their ids
    pub fn iter(&self) -> impl Iterator<Item = (u64, &TransactionEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i as u64, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_dense_ids() {
        let mut store = EntryStore::new();

        let id0 = store.create("dest".to_string(), 100, vec![]);
        let id1 = store.create("dest".to_string(), 200, vec![1, 2]);

        assert_eq!(id0, 0);
        assert_eq!(id1, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_new_entry_state() {
        let mut store = EntryStore::new();
        let id = store.create("recipient".to_string(), 500, vec![0xde, 0xad]);

        let entry = store.get(id).unwrap();
        assert_eq!(entry.destination, "recipient");
        assert_eq!(entry.value, 500);
        assert_eq!(entry.payload, vec![0xde, 0xad]);
        assert!(!entry.executed);
        assert_eq!(entry.approvals, 0);
        assert!(entry.executed_at.is_none());
    }

    #[test]
    fn test_unknown_entry() {
        let store = EntryStore::new();
        let result = store.get(0);
        assert!(matches!(result, Err(WalletError::UnknownEntry(0))));
    }

    #[test]
    fn test_iter_in_creation_order() {
        let mut store = EntryStore::new();
        store.create("a".to_string(), 1, vec![]);
        store.create("b".to_string(), 2, vec![]);

        let ids: Vec<u64> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
