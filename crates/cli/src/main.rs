// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `opskit` — directory admin console: runbook scripts and execution history.

mod commands;
mod env;
mod exit_error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "opskit",
    version,
    about = "Directory admin console: run operator scripts and inspect their history"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available scripts, or show one script's details
    Scripts {
        /// Script name to inspect
        name: Option<String>,
    },
    /// Run a script with bound parameters
    Run {
        /// Script name from the catalog
        name: String,
        /// Parameter value as KEY=VALUE (repeatable)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Show recent execution history
    History {
        /// Maximum records to show
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Export execution history as CSV
    Export {
        /// Destination file
        path: PathBuf,
        /// Cap the number of exported records (default: all)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show the audit trail of console actions
    Log {
        /// Maximum entries to show
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Scripts { name } => commands::scripts::handle(name.as_deref()),
        Command::Run { name, params } => commands::run::handle(&name, &params).await,
        Command::History { limit } => commands::history::handle(limit),
        Command::Export { path, limit } => commands::history::handle_export(&path, limit),
        Command::Log { limit } => commands::history::handle_log(limit),
    };

    if let Err(err) = result {
        match err.downcast_ref::<exit_error::ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("{}", exit.message);
                }
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}

/// Logs go to stderr so script output on stdout stays clean.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("OPSKIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
