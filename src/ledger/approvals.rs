//! Per-entry approval bookkeeping
//!
//! Tracks which owners have approved which entries and keeps each
//! entry's tally equal to the number of set bits.

use crate::ledger::entry::TransactionEntry;
use crate::wallet::WalletError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Tracks owner approvals per ledger entry
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApprovalTracker {
    /// Entry id -> set of owners that have approved it
    approved: HashMap<u64, HashSet<String>>,
}

impl ApprovalTracker {
    /// Create a new empty tracker
    pub fn new() -> Self {
        Self {
            approved: HashMap::new(),
        }
    }

    /// Record an owner's approval and return the updated tally
    ///
    /// # Errors
    /// Fails with `AlreadyExecuted` if the entry has executed, or
    /// `AlreadyApproved` if this owner already approved it.
    pub fn approve(
        &mut self,
        entry_id: u64,
        owner: &str,
        entry: &mut TransactionEntry,
    ) -> Result<u32, WalletError> {
        if entry.executed {
            return Err(WalletError::AlreadyExecuted);
        }

        let approvers = self.approved.entry(entry_id).or_default();
        if !approvers.insert(owner.to_string()) {
            return Err(WalletError::AlreadyApproved);
        }

        entry.approvals += 1;
        Ok(entry.approvals)
    }

    /// Clear an owner's approval
    ///
    /// Clearing an approval that was never given succeeds without
    /// changing anything. Returns whether a bit was actually cleared.
    ///
    /// # Errors
    /// Fails with `AlreadyExecuted` if the entry has executed.
    pub fn revoke(
        &mut self,
        entry_id: u64,
        owner: &str,
        entry: &mut TransactionEntry,
    ) -> Result<bool, WalletError> {
        if entry.executed {
            return Err(WalletError::AlreadyExecuted);
        }

        let cleared = self
            .approved
            .get_mut(&entry_id)
            .map(|approvers| approvers.remove(owner))
            .unwrap_or(false);

        if cleared {
            entry.approvals -= 1;
        }

        Ok(cleared)
    }

    /// Check whether an owner has approved an entry
    pub fn is_approved(&self, entry_id: u64, owner: &str) -> bool {
        self.approved
            .get(&entry_id)
            .map(|approvers| approvers.contains(owner))
            .unwrap_or(false)
    }

    /// Owners currently approving an entry
    pub fn approvers(&self, entry_id: u64) -> Vec<&str> {
        self.approved
            .get(&entry_id)
            .map(|approvers| approvers.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::EntryStore;

    fn store_with_entry() -> EntryStore {
        let mut store = EntryStore::new();
        store.create("dest".to_string(), 100, vec![]);
        store
    }

    #[test]
    fn test_approve_sets_bit_and_tally() {
        let mut store = store_with_entry();
        let mut tracker = ApprovalTracker::new();

        let entry = store.get_mut(0).unwrap();
        let tally = tracker.approve(0, "alice", entry).unwrap();

        assert_eq!(tally, 1);
        assert!(tracker.is_approved(0, "alice"));
        assert!(!tracker.is_approved(0, "bob"));
        assert_eq!(store.get(0).unwrap().approvals, 1);
    }

    #[test]
    fn test_duplicate_approval_rejected() {
        let mut store = store_with_entry();
        let mut tracker = ApprovalTracker::new();

        let entry = store.get_mut(0).unwrap();
        tracker.approve(0, "alice", entry).unwrap();
        let result = tracker.approve(0, "alice", entry);

        assert!(matches!(result, Err(WalletError::AlreadyApproved)));
        assert_eq!(entry.approvals, 1);
    }

    #[test]
    fn test_revoke_clears_bit_and_tally() {
        let mut store = store_with_entry();
        let mut tracker = ApprovalTracker::new();

        let entry = store.get_mut(0).unwrap();
        tracker.approve(0, "alice", entry).unwrap();
        let cleared = tracker.revoke(0, "alice", entry).unwrap();

        assert!(cleared);
        assert!(!tracker.is_approved(0, "alice"));
        assert_eq!(entry.approvals, 0);
    }

    #[test]
    fn test_revoke_without_approval_is_noop() {
        let mut store = store_with_entry();
        let mut tracker = ApprovalTracker::new();

        let entry = store.get_mut(0).unwrap();
        let cleared = tracker.revoke(0, "alice", entry).unwrap();

        assert!(!cleared);
        assert_eq!(entry.approvals, 0);
    }

    #[test]
    fn test_executed_entry_is_frozen() {
        let mut store = store_with_entry();
        let mut tracker = ApprovalTracker::new();

        let entry = store.get_mut(0).unwrap();
        tracker.approve(0, "alice", entry).unwrap();
        entry.executed = true;

        assert!(matches!(
            tracker.approve(0, "bob", entry),
            Err(WalletError::AlreadyExecuted)
        ));
        assert!(matches!(
            tracker.revoke(0, "alice", entry),
            Err(WalletError::AlreadyExecuted)
        ));
        assert_eq!(entry.approvals, 1);
    }

    #[test]
    fn test_approvals_tracked_per_entry() {
        let mut store = EntryStore::new();
        store.create("a".to_string(), 1, vec![]);
        store.create("b".to_string(), 2, vec![]);
        let mut tracker = ApprovalTracker::new();

        let entry = store.get_mut(0).unwrap();
        tracker.approve(0, "alice", entry).unwrap();

        assert!(tracker.is_approved(0, "alice"));
        assert!(!tracker.is_approved(1, "alice"));
        assert_eq!(store.get(1).unwrap().approvals, 0);
    }
}
