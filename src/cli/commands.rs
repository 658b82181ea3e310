//! CLI commands for the wallet
//!
//! Implements all command handlers for the CLI interface.

use crate::funds::CreditLedger;
use crate::storage::{StorageConfig, WalletState, WalletStore};
use crate::wallet::{MultisigWallet, WalletEvent};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub state: WalletState,
    pub store: WalletStore,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from the data directory
    pub fn load(data_dir: PathBuf) -> CliResult<Self> {
        let storage_config = StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        };
        let store = WalletStore::new(storage_config)?;

        if !store.exists() {
            return Err(format!(
                "No wallet found in {:?}. Run `msigwallet init` first.",
                data_dir
            )
            .into());
        }

        let state = store.load()?;
        Ok(Self {
            state,
            store,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.store.save(&self.state)?;
        Ok(())
    }
}

/// Create a new wallet
pub fn cmd_init(data_dir: &Path, owners: &[String], required: u32) -> CliResult<()> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    let store = WalletStore::new(storage_config)?;

    if store.exists() {
        println!("⚠️  Wallet already exists at {:?}", data_dir);
        return Ok(());
    }

    let wallet = MultisigWallet::new(owners.to_vec(), required)?;

    println!("✅ Wallet created!");
    println!("   📍 Address: {}", wallet.address());
    println!(
        "   👥 Owners ({}): {}",
        wallet.owners().len(),
        wallet.owners().join(", ")
    );
    println!("   ✍️  Required signatures: {}", wallet.required_signatures());
    println!("   📁 Data directory: {:?}", data_dir);

    store.save(&WalletState {
        wallet,
        credits: CreditLedger::new(),
    })?;

    Ok(())
}

/// Deposit funds into the wallet
pub fn cmd_deposit(state: &mut AppState, value: u128) -> CliResult<()> {
    state.state.wallet.deposit(value);
    state.save()?;

    println!("💰 Deposited {} units", value);
    println!("   New balance: {}", state.state.wallet.balance());

    Ok(())
}

/// Propose a new transaction
pub fn cmd_propose(
    state: &mut AppState,
    from: &str,
    to: &str,
    value: u128,
    payload_hex: Option<&str>,
) -> CliResult<()> {
    let payload = match payload_hex {
        Some(h) => hex::decode(h.trim_start_matches("0x"))?,
        None => Vec::new(),
    };

    let entry_id = state
        .state
        .wallet
        .propose_transaction(from, to, value, payload)?;
    state.save()?;

    println!("📝 Transaction {} proposed", entry_id);
    println!("   To: {}", to);
    println!("   Value: {}", value);
    println!(
        "   Needs {} approval(s) to execute",
        state.state.wallet.required_signatures()
    );

    Ok(())
}

/// Approve a transaction
pub fn cmd_approve(state: &mut AppState, from: &str, entry_id: u64) -> CliResult<()> {
    let outcome = state
        .state
        .wallet
        .approve_transaction(from, entry_id, &mut state.state.credits)?;
    state.save()?;

    println!(
        "👍 Transaction {} approved by {} ({}/{})",
        entry_id,
        from,
        outcome.approvals,
        state.state.wallet.required_signatures()
    );
    if outcome.executed {
        println!("   🚀 Quorum reached, transaction executed!");
        println!("   New balance: {}", state.state.wallet.balance());
    }

    Ok(())
}

/// Revoke an approval
pub fn cmd_revoke(state: &mut AppState, from: &str, entry_id: u64) -> CliResult<()> {
    let cleared = state.state.wallet.revoke_approval(from, entry_id)?;
    state.save()?;

    if cleared {
        println!("↩️  Approval of transaction {} revoked by {}", entry_id, from);
    } else {
        println!("   {} had not approved transaction {}", from, entry_id);
    }

    Ok(())
}

/// Show wallet info and all transactions
pub fn cmd_show(state: &AppState) -> CliResult<()> {
    let wallet = &state.state.wallet;

    println!("🏦 Wallet {}", wallet.address());
    println!("   Owners: {}", wallet.owners().join(", "));
    println!("   Required signatures: {}", wallet.required_signatures());
    println!("   Balance: {}", wallet.balance());
    println!("   Transactions: {}", wallet.transaction_count());

    for (id, entry) in wallet.transactions() {
        let status = if entry.executed { "executed" } else { "pending" };
        println!(
            "   ├─ [{}] {} -> {} ({}, {} approval(s))",
            id, entry.value, entry.destination, status, entry.approvals
        );
    }

    Ok(())
}

/// Show the wallet balance
pub fn cmd_balance(state: &AppState) -> CliResult<()> {
    println!("💰 Balance: {}", state.state.wallet.balance());
    Ok(())
}

/// Show recent wallet events
pub fn cmd_events(state: &AppState) -> CliResult<()> {
    let events = state.state.wallet.events();

    if events.is_empty() {
        println!("No events recorded.");
        return Ok(());
    }

    println!("📋 Events ({}):", events.len());
    for event in events {
        match event {
            WalletEvent::TransactionProposed {
                entry_id,
                destination,
                value,
                at,
            } => println!("   {} proposed [{}]: {} -> {}", at, entry_id, value, destination),
            WalletEvent::TransactionApproved {
                entry_id,
                owner,
                approvals,
                at,
            } => println!("   {} approved [{}] by {} ({} total)", at, entry_id, owner, approvals),
            WalletEvent::TransactionExecuted { entry_id, at } => {
                println!("   {} executed [{}]", at, entry_id)
            }
            WalletEvent::ApprovalRevoked { entry_id, owner, at } => {
                println!("   {} revoked [{}] by {}", at, entry_id, owner)
            }
            WalletEvent::Deposited { value, at } => {
                println!("   {} deposited {}", at, value)
            }
        }
    }

    Ok(())
}
