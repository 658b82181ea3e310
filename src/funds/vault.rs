//! The wallet's held balance
//!
//! Deposits credit the vault; the only debit path is a successful
//! execution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while moving funds
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransferError {
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientFunds { have: u128, need: u128 },
    #[error("Destination rejected transfer: {0}")]
    Rejected(String),
}

/// Native balance held by one wallet instance
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vault {
    balance: u128,
}

impl Vault {
    /// Create an empty vault
    pub fn new() -> Self {
        Self { balance: 0 }
    }

    /// Credit the vault
    pub fn deposit(&mut self, value: u128) {
        self.balance += value;
    }

    /// Current held balance
    pub fn balance(&self) -> u128 {
        self.balance
    }

    /// Debit the vault, failing if the balance does not cover `value`
    pub fn debit(&mut self, value: u128) -> Result<(), TransferError> {
        if self.balance < value {
            return Err(TransferError::InsufficientFunds {
                have: self.balance,
                need: value,
            });
        }
        self.balance -= value;
        Ok(())
    }
}
