//! Multisig Wallet CLI Application
//!
//! A command-line interface for operating a quorum-approval wallet.

use clap::{Parser, Subcommand};
use msig_wallet::cli::{self, AppState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "msigwallet")]
#[command(version = "0.1.0")]
#[command(about = "A quorum-approval custodial wallet", long_about = None)]
struct Cli {
    /// Data directory for wallet storage
    #[arg(short, long, default_value = ".msigwallet_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new wallet with a fixed owner set
    Init {
        /// Owner identities (repeat for each owner)
        #[arg(short, long, required = true)]
        owner: Vec<String>,

        /// Number of approvals required to execute a transaction
        #[arg(short, long)]
        required: u32,
    },

    /// Deposit funds into the wallet
    Deposit {
        /// Amount to deposit (base units)
        #[arg(short, long)]
        value: u128,
    },

    /// Propose a new transaction
    Propose {
        /// Proposing owner
        #[arg(short, long)]
        from: String,

        /// Destination identity
        #[arg(short, long)]
        to: String,

        /// Amount to transfer (base units)
        #[arg(short, long)]
        value: u128,

        /// Optional hex-encoded payload
        #[arg(short, long)]
        payload: Option<String>,
    },

    /// Approve a pending transaction
    Approve {
        /// Approving owner
        #[arg(short, long)]
        from: String,

        /// Transaction id
        #[arg(short, long)]
        id: u64,
    },

    /// Revoke a previously given approval
    Revoke {
        /// Revoking owner
        #[arg(short, long)]
        from: String,

        /// Transaction id
        #[arg(short, long)]
        id: u64,
    },

    /// Show wallet info and transactions
    Show,

    /// Show the wallet balance
    Balance,

    /// Show recent wallet events
    Events,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init separately (doesn't need existing state)
    if let Commands::Init { owner, required } = &cli.command {
        return cli::cmd_init(&cli.data_dir, owner, *required);
    }

    let mut state = AppState::load(cli.data_dir.clone())?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),
        Commands::Deposit { value } => cli::cmd_deposit(&mut state, value)?,
        Commands::Propose {
            from,
            to,
            value,
            payload,
        } => cli::cmd_propose(&mut state, &from, &to, value, payload.as_deref())?,
        Commands::Approve { from, id } => cli::cmd_approve(&mut state, &from, id)?,
        Commands::Revoke { from, id } => cli::cmd_revoke(&mut state, &from, id)?,
        Commands::Show => cli::cmd_show(&state)?,
        Commands::Balance => cli::cmd_balance(&state)?,
        Commands::Events => cli::cmd_events(&state)?,
    }

    Ok(())
}
