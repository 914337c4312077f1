//! Wallet Ledger CLI
//!
//! Loads a dump directory into a fresh ledger and writes the merged account
//! set to stdout in the bulk format.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data/dumps > accounts.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use std::env;
use std::io;
use std::process;
use wallet_ledger::{Ledger, LedgerError, Result};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(LedgerError::MissingArgument);
    }

    let dump_dir = &args[1];
    let mut ledger = Ledger::new();
    ledger.import(dump_dir)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    ledger.export_bulk(handle)?;

    Ok(())
}
