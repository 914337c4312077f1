//! Error types for the wallet ledger.

use crate::account::AccountId;
use crate::codec::{DecodeError, RecordKind};
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur during ledger operation.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Deposit or payment amount was zero or negative
    #[error("amount must be greater than zero")]
    AmountMustBePositive,

    /// Account balance is smaller than the payment amount
    #[error("not enough balance on account {0}")]
    InsufficientBalance(AccountId),

    /// Phone number already belongs to another account
    #[error("phone {0} is already registered")]
    PhoneAlreadyRegistered(String),

    /// A favorite with this payment's ID already exists
    #[error("payment {0} is already favorited")]
    PaymentAlreadyFavorited(String),

    /// Reject of a payment that is no longer in progress
    #[error("payment {0} is not in progress")]
    PaymentNotInProgress(String),

    /// No account with the given ID
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// No payment with the given ID
    #[error("payment {0} not found")]
    PaymentNotFound(String),

    /// No favorite with the given ID
    #[error("favorite {0} not found")]
    FavoriteNotFound(String),

    /// A record field failed semantic decoding
    #[error("invalid {kind} record {record}: {source}")]
    InvalidRecord {
        kind: RecordKind,
        record: usize,
        source: DecodeError,
    },

    /// Structural failure in a delimited stream
    #[error("codec error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open, read or write a persistence source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing dump directory argument
    #[error("Missing dump directory argument. Usage: wallet-ledger <dump-dir>")]
    MissingArgument,
}
