//! # Wallet Ledger
//!
//! An in-memory ledger of accounts, payments and favorite payments with a
//! flat-text persistence format.
//!
//! ## Design Principles
//!
//! - **Integer money**: amounts are `i64` minor currency units, exact by
//!   construction
//! - **Explicit ownership**: the [`Ledger`] is a plain value the caller
//!   threads through; no global state
//! - **Two wire formats**: a single-file `|`-terminated bulk format for
//!   accounts, and per-kind newline-terminated dump files that merge by
//!   record ID on import
//!
//! ## Example
//!
//! ```no_run
//! use wallet_ledger::{Ledger, Money};
//!
//! let mut ledger = Ledger::new();
//! let account = ledger.register_account("+992900000001").unwrap();
//! ledger.deposit(account.id, Money::new(100_00)).unwrap();
//! ledger.pay(account.id, Money::new(25_00), "Auto").unwrap();
//! ledger.export("data").unwrap();
//! ```

pub mod account;
pub mod codec;
pub mod error;
pub mod favorite;
pub mod ledger;
pub mod money;
pub mod payment;
pub mod persist;

pub use account::{Account, AccountId};
pub use codec::{DecodeError, ParsePolicy, RecordKind};
pub use error::{LedgerError, Result};
pub use favorite::Favorite;
pub use ledger::{Ledger, MergeOutcome};
pub use money::Money;
pub use payment::{Payment, PaymentStatus};
