//! Owner set and quorum threshold
//!
//! The owner list and required signature count are fixed when the wallet
//! is created and never change afterwards.

use crate::funds::TransferError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("At least one owner is required")]
    EmptyOwnerSet,
    #[error("Invalid number of required signatures")]
    InvalidThreshold,
    #[error("Duplicate owner: {0}")]
    DuplicateOwner(String),
    #[error("Not an owner")]
    NotAnOwner,
    #[error("Unknown transaction: {0}")]
    UnknownEntry(u64),
    #[error("Transaction already executed")]
    AlreadyExecuted,
    #[error("Transaction already approved by this owner")]
    AlreadyApproved,
    #[error("Execution failed: {0}")]
    ExecutionFailed(#[from] TransferError),
}

/// The fixed set of owner identities and the approval threshold
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OwnerRegistry {
    /// Owner identities in the order given at construction
    owners: Vec<String>,
    /// Approvals required before a transaction executes (M in M-of-N)
    required_signatures: u32,
}

impl OwnerRegistry {
    /// Create a new registry
    ///
    /// # Errors
    /// Returns an error if the owner list is empty, contains duplicates,
    /// or the threshold is 0 or exceeds the owner count.
    pub fn new(owners: Vec<String>, required_signatures: u32) -> Result<Self, WalletError> {
        if owners.is_empty() {
            return Err(WalletError::EmptyOwnerSet);
        }

        if required_signatures == 0 || required_signatures as usize > owners.len() {
            return Err(WalletError::InvalidThreshold);
        }

        // Check for duplicates
        let mut sorted_owners = owners.clone();
        sorted_owners.sort();
        for i in 1..sorted_owners.len() {
            if sorted_owners[i] == sorted_owners[i - 1] {
                return Err(WalletError::DuplicateOwner(sorted_owners[i].clone()));
            }
        }

        Ok(Self {
            owners,
            required_signatures,
        })
    }

    /// Check if an identity is an authorized owner
    pub fn is_owner(&self, identity: &str) -> bool {
        self.owners.iter().any(|o| o == identity)
    }

    /// Positional read of the owner list
    pub fn owner_at(&self, index: usize) -> Option<&str> {
        self.owners.get(index).map(String::as_str)
    }

    /// All owners in construction order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Get the approval threshold (M)
    pub fn required_signatures(&self) -> u32 {
        self.required_signatures
    }

    /// Get the total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Get description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required_signatures, self.owners.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<String> {
        vec![
            "alice".to_string(),
            "bob".to_string(),
            "carol".to_string(),
        ]
    }

    #[test]
    fn test_registry_creation() {
        let registry = OwnerRegistry::new(sample_owners(), 2).unwrap();

        assert_eq!(registry.required_signatures(), 2);
        assert_eq!(registry.owner_count(), 3);
        assert_eq!(registry.description(), "2-of-3");
    }

    #[test]
    fn test_owner_order_preserved() {
        let registry = OwnerRegistry::new(sample_owners(), 1).unwrap();

        assert_eq!(registry.owner_at(0), Some("alice"));
        assert_eq!(registry.owner_at(1), Some("bob"));
        assert_eq!(registry.owner_at(2), Some("carol"));
        assert_eq!(registry.owner_at(3), None);
    }

    #[test]
    fn test_empty_owner_set_rejected() {
        let result = OwnerRegistry::new(vec![], 1);
        assert!(matches!(result, Err(WalletError::EmptyOwnerSet)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "At least one owner is required"
        );
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        // Zero threshold
        let result = OwnerRegistry::new(sample_owners(), 0);
        assert!(matches!(result, Err(WalletError::InvalidThreshold)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid number of required signatures"
        );

        // Threshold exceeds owner count
        assert!(matches!(
            OwnerRegistry::new(sample_owners(), 4),
            Err(WalletError::InvalidThreshold)
        ));
    }

    #[test]
    fn test_duplicate_owner_rejected() {
        let result = OwnerRegistry::new(
            vec!["alice".to_string(), "bob".to_string(), "alice".to_string()],
            2,
        );
        assert!(matches!(result, Err(WalletError::DuplicateOwner(_))));
    }

    #[test]
    fn test_is_owner() {
        let registry = OwnerRegistry::new(sample_owners(), 2).unwrap();

        assert!(registry.is_owner("alice"));
        assert!(registry.is_owner("carol"));
        assert!(!registry.is_owner("mallory"));
    }
}
