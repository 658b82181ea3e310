//! Command-line interface

pub mod commands;

pub use commands::{
    cmd_approve, cmd_balance, cmd_deposit, cmd_events, cmd_init, cmd_propose, cmd_revoke,
    cmd_show, AppState, CliResult,
};
