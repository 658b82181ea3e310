//! Quorum-triggered execution
//!
//! Once an entry reaches the approval threshold, the facade hands it to
//! `try_execute`, which moves the funds and marks the entry executed as
//! one all-or-nothing step.

use crate::funds::vault::{TransferError, Vault};
use crate::ledger::entry::TransactionEntry;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Receiver of executed transfers
///
/// The wallet itself only debits its vault; where the value actually
/// lands is the caller's concern. Implementations may reject a delivery,
/// which aborts the execution with no funds moved.
pub trait FundsOutlet {
    /// Deliver `value` and the entry's payload to `destination`
    fn deliver(
        &mut self,
        destination: &str,
        value: u128,
        payload: &[u8],
    ) -> Result<(), TransferError>;
}

/// A delivered transfer, as recorded by [`CreditLedger`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Delivery {
    pub destination: String,
    pub value: u128,
    pub payload: Vec<u8>,
}

/// Default outlet: credits destinations in an in-memory ledger
///
/// Never rejects a delivery. Used by the CLI to make executed transfers
/// observable.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreditLedger {
    /// Destination -> total value received
    credits: HashMap<String, u128>,
    /// Every delivery in execution order
    deliveries: Vec<Delivery>,
}

impl CreditLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Total value delivered to a destination
    pub fn credit_of(&self, destination: &str) -> u128 {
        *self.credits.get(destination).unwrap_or(&0)
    }

    /// All deliveries in execution order
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }
}

impl FundsOutlet for CreditLedger {
    fn deliver(
        &mut self,
        destination: &str,
        value: u128,
        payload: &[u8],
    ) -> Result<(), TransferError> {
        *self.credits.entry(destination.to_string()).or_insert(0) += value;
        self.deliveries.push(Delivery {
            destination: destination.to_string(),
            value,
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// Execute an entry that has reached quorum
///
/// Debits the vault and delivers to the outlet; only after both succeed
/// is the entry marked executed. If the delivery fails the debit is
/// restored, so a failed execution leaves the vault and the entry
/// exactly as they were.
pub fn try_execute(
    entry_id: u64,
    entry: &mut TransactionEntry,
    vault: &mut Vault,
    outlet: &mut dyn FundsOutlet,
) -> Result<(), TransferError> {
    debug_assert!(!entry.executed, "execution invoked on an executed entry");

    vault.debit(entry.value)?;

    if let Err(err) = outlet.deliver(&entry.destination, entry.value, &entry.payload) {
        // Restore the debit so the failure leaves no trace
        vault.deposit(entry.value);
        return Err(err);
    }

    entry.executed = true;
    entry.executed_at = Some(Utc::now());

    log::info!(
        "Transaction {} executed: {} -> {}",
        entry_id,
        entry.value,
        entry.destination
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::EntryStore;

    /// Outlet that refuses every delivery
    struct RejectingOutlet;

    impl FundsOutlet for RejectingOutlet {
        fn deliver(&mut self, _: &str, _: u128, _: &[u8]) -> Result<(), TransferError> {
            Err(TransferError::Rejected("outlet closed".to_string()))
        }
    }

    #[test]
    fn test_successful_execution() {
        let mut store = EntryStore::new();
        let id = store.create("recipient".to_string(), 300, vec![0x01]);
        let mut vault = Vault::new();
        vault.deposit(1000);
        let mut outlet = CreditLedger::new();

        let entry = store.get_mut(id).unwrap();
        try_execute(id, entry, &mut vault, &mut outlet).unwrap();

        assert!(entry.executed);
        assert!(entry.executed_at.is_some());
        assert_eq!(vault.balance(), 700);
        assert_eq!(outlet.credit_of("recipient"), 300);
        assert_eq!(outlet.deliveries().len(), 1);
        assert_eq!(outlet.deliveries()[0].payload, vec![0x01]);
    }

    #[test]
    fn test_insufficient_balance_leaves_no_trace() {
        let mut store = EntryStore::new();
        let id = store.create("recipient".to_string(), 300, vec![]);
        let mut vault = Vault::new();
        vault.deposit(100);
        let mut outlet = CreditLedger::new();

        let entry = store.get_mut(id).unwrap();
        let result = try_execute(id, entry, &mut vault, &mut outlet);

        assert!(matches!(
            result,
            Err(TransferError::InsufficientFunds { have: 100, need: 300 })
        ));
        assert!(!entry.executed);
        assert_eq!(vault.balance(), 100);
        assert_eq!(outlet.credit_of("recipient"), 0);
    }

    #[test]
    fn test_rejected_delivery_restores_debit() {
        let mut store = EntryStore::new();
        let id = store.create("recipient".to_string(), 300, vec![]);
        let mut vault = Vault::new();
        vault.deposit(1000);
        let mut outlet = RejectingOutlet;

        let entry = store.get_mut(id).unwrap();
        let result = try_execute(id, entry, &mut vault, &mut outlet);

        assert!(matches!(result, Err(TransferError::Rejected(_))));
        assert!(!entry.executed);
        assert_eq!(vault.balance(), 1000);
    }
}
