//! Multi-owner wallet facade
//!
//! Composes the registry, ledger, and vault into the externally callable
//! surface. Every mutating operation authorizes the caller first; the
//! approval that completes the quorum executes the transfer
//! synchronously within the same call, or fails leaving no trace.

use crate::funds::{try_execute, FundsOutlet, Vault};
use crate::ledger::{ApprovalTracker, EntryStore, TransactionEntry};
use crate::wallet::registry::{OwnerRegistry, WalletError};
use chrono::{DateTime, Utc};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Maximum number of events kept in the wallet's history
const MAX_EVENT_HISTORY: usize = 100;

/// Observable wallet notifications
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum WalletEvent {
    TransactionProposed {
        entry_id: u64,
        destination: String,
        value: u128,
        at: DateTime<Utc>,
    },
    TransactionApproved {
        entry_id: u64,
        owner: String,
        approvals: u32,
        at: DateTime<Utc>,
    },
    TransactionExecuted {
        entry_id: u64,
        at: DateTime<Utc>,
    },
    ApprovalRevoked {
        entry_id: u64,
        owner: String,
        at: DateTime<Utc>,
    },
    Deposited {
        value: u128,
        at: DateTime<Utc>,
    },
}

/// Result of an approval call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApprovalOutcome {
    /// Tally after this approval
    pub approvals: u32,
    /// Whether this approval completed the quorum and executed the entry
    pub executed: bool,
}

/// A multi-owner custodial wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigWallet {
    /// Deterministic wallet address derived from owners and threshold
    address: String,
    registry: OwnerRegistry,
    entries: EntryStore,
    approvals: ApprovalTracker,
    vault: Vault,
    /// Recent events, oldest first (last 100)
    events: Vec<WalletEvent>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl MultisigWallet {
    /// Create a new wallet with a fixed owner set and threshold
    ///
    /// # Errors
    /// Fails if the owner list is empty or contains duplicates, or the
    /// threshold is 0 or exceeds the owner count. No wallet exists after
    /// a failed construction.
    pub fn new(owners: Vec<String>, required_signatures: u32) -> Result<Self, WalletError> {
        let registry = OwnerRegistry::new(owners, required_signatures)?;
        let address = Self::generate_address(&registry);

        log::info!(
            "Multisig wallet created: {} ({})",
            address,
            registry.description()
        );

        Ok(Self {
            address,
            registry,
            entries: EntryStore::new(),
            approvals: ApprovalTracker::new(),
            vault: Vault::new(),
            events: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Generate P2SH-style address from the owner set
    ///
    /// Address = Base58Check(version || RIPEMD160(SHA256(threshold || sorted_owners)))
    fn generate_address(registry: &OwnerRegistry) -> String {
        // Sort owners for a deterministic address
        let mut sorted_owners = registry.owners().to_vec();
        sorted_owners.sort();

        let mut script_data = registry.required_signatures().to_be_bytes().to_vec();
        for owner in &sorted_owners {
            script_data.extend_from_slice(owner.as_bytes());
        }

        let sha256_hash = Sha256::digest(&script_data);

        let mut ripemd = Ripemd160::new();
        ripemd.update(sha256_hash);
        let ripemd_hash = ripemd.finalize();

        // P2SH version byte (0x05 -> addresses starting with '3')
        let mut address_bytes = vec![0x05];
        address_bytes.extend_from_slice(&ripemd_hash);

        // Checksum: first 4 bytes of double SHA256
        let checksum = {
            let first_hash = Sha256::digest(&address_bytes);
            let second_hash = Sha256::digest(first_hash);
            second_hash[..4].to_vec()
        };
        address_bytes.extend_from_slice(&checksum);

        bs58::encode(address_bytes).into_string()
    }

    // =========================================================================
    // View functions
    // =========================================================================

    /// Get the wallet address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Check if an identity is an owner
    pub fn is_owner(&self, identity: &str) -> bool {
        self.registry.is_owner(identity)
    }

    /// Positional read of the owner list
    pub fn owner_at(&self, index: usize) -> Option<&str> {
        self.registry.owner_at(index)
    }

    /// All owners in construction order
    pub fn owners(&self) -> &[String] {
        self.registry.owners()
    }

    /// Get the approval threshold
    pub fn required_signatures(&self) -> u32 {
        self.registry.required_signatures()
    }

    /// Current held balance
    pub fn balance(&self) -> u128 {
        self.vault.balance()
    }

    /// Get a ledger entry by id
    pub fn transaction(&self, entry_id: u64) -> Result<&TransactionEntry, WalletError> {
        self.entries.get(entry_id)
    }

    /// Number of entries ever proposed
    pub fn transaction_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over all entries with their ids
    pub fn transactions(&self) -> impl Iterator<Item = (u64, &TransactionEntry)> {
        self.entries.iter()
    }

    /// Per-owner approval bit
    ///
    /// Returns false for unknown entries, like an absent map key.
    pub fn is_approved_by(&self, entry_id: u64, owner: &str) -> bool {
        self.approvals.is_approved(entry_id, owner)
    }

    /// Recent events, oldest first
    pub fn events(&self) -> &[WalletEvent] {
        &self.events
    }

    /// When the wallet was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Mutating functions
    // =========================================================================

    /// Credit the wallet's balance
    ///
    /// Any value sent to the wallet address lands here; depositors need
    /// not be owners.
    pub fn deposit(&mut self, value: u128) {
        self.vault.deposit(value);
        self.push_event(WalletEvent::Deposited {
            value,
            at: Utc::now(),
        });
    }

    /// Propose a new transaction and return its entry id
    ///
    /// The balance is not checked at proposal time; a proposal exceeding
    /// the held balance only fails when it executes.
    pub fn propose_transaction(
        &mut self,
        caller: &str,
        destination: &str,
        value: u128,
        payload: Vec<u8>,
    ) -> Result<u64, WalletError> {
        self.authorize(caller)?;

        let entry_id = self.entries.create(destination.to_string(), value, payload);

        log::info!(
            "Transaction {} proposed by {}: {} -> {}",
            entry_id,
            caller,
            value,
            destination
        );
        self.push_event(WalletEvent::TransactionProposed {
            entry_id,
            destination: destination.to_string(),
            value,
            at: Utc::now(),
        });

        Ok(entry_id)
    }

    /// Record the caller's approval of an entry
    ///
    /// If the approval raises the tally to the threshold, the transfer
    /// executes synchronously within this call. On execution failure the
    /// whole call unwinds: the approval bit is unset, the tally reverts,
    /// and the entry stays unexecuted.
    pub fn approve_transaction(
        &mut self,
        caller: &str,
        entry_id: u64,
        outlet: &mut dyn FundsOutlet,
    ) -> Result<ApprovalOutcome, WalletError> {
        self.authorize(caller)?;

        let threshold = self.registry.required_signatures();
        let entry = self.entries.get_mut(entry_id)?;
        let tally = self.approvals.approve(entry_id, caller, entry)?;

        let mut executed = false;
        if tally >= threshold {
            if let Err(err) = try_execute(entry_id, entry, &mut self.vault, outlet) {
                // Unwind the triggering approval so the failed call
                // leaves the bookkeeping exactly as it found it.
                self.approvals.revoke(entry_id, caller, entry)?;
                log::warn!(
                    "Transaction {} execution failed, approval by {} rolled back: {}",
                    entry_id,
                    caller,
                    err
                );
                return Err(WalletError::ExecutionFailed(err));
            }
            executed = true;
        }

        self.push_event(WalletEvent::TransactionApproved {
            entry_id,
            owner: caller.to_string(),
            approvals: tally,
            at: Utc::now(),
        });
        if executed {
            self.push_event(WalletEvent::TransactionExecuted {
                entry_id,
                at: Utc::now(),
            });
        }

        Ok(ApprovalOutcome {
            approvals: tally,
            executed,
        })
    }

    /// Clear the caller's approval of an entry
    ///
    /// Revoking an approval that was never given succeeds without
    /// changing anything. Returns whether a bit was actually cleared.
    pub fn revoke_approval(&mut self, caller: &str, entry_id: u64) -> Result<bool, WalletError> {
        self.authorize(caller)?;

        let entry = self.entries.get_mut(entry_id)?;
        let cleared = self.approvals.revoke(entry_id, caller, entry)?;

        if cleared {
            log::info!("Approval of transaction {} revoked by {}", entry_id, caller);
            self.push_event(WalletEvent::ApprovalRevoked {
                entry_id,
                owner: caller.to_string(),
                at: Utc::now(),
            });
        }

        Ok(cleared)
    }

    /// Reject non-owners before any state is touched
    fn authorize(&self, caller: &str) -> Result<(), WalletError> {
        if !self.registry.is_owner(caller) {
            return Err(WalletError::NotAnOwner);
        }
        Ok(())
    }

    fn push_event(&mut self, event: WalletEvent) {
        self.events.push(event);
        if self.events.len() > MAX_EVENT_HISTORY {
            self.events.remove(0);
        }
    }
}
