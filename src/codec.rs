//! Text codec for the bulk and dump wire formats.
//!
//! Both formats are `;`-delimited. The bulk format holds accounts only and
//! terminates records with `|` (one physical line, no newlines); the dump
//! format is one newline-terminated file per record kind. Raw all-string
//! record mirrors carry each line through serde; converting a raw record
//! into its domain type is where integer parsing, and therefore the parse
//! policy, applies.

use crate::account::Account;
use crate::favorite::Favorite;
use crate::money::Money;
use crate::payment::{Payment, PaymentStatus, UnknownStatus};
use csv::Terminator;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;
use thiserror::Error;

/// Field separator shared by both wire formats.
pub const FIELD_DELIMITER: u8 = b';';

/// Record terminator of the bulk account format.
pub const BULK_TERMINATOR: u8 = b'|';

/// The three record kinds the dump directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Account,
    Payment,
    Favorite,
}

impl RecordKind {
    /// All kinds, in the order the exporter writes them.
    pub const ALL: [RecordKind; 3] = [RecordKind::Account, RecordKind::Payment, RecordKind::Favorite];

    /// Fixed dump file name for this kind.
    pub fn dump_file(self) -> &'static str {
        match self {
            RecordKind::Account => "accounts.dump",
            RecordKind::Payment => "payments.dump",
            RecordKind::Favorite => "favorites.dump",
        }
    }

    /// Resolves a dump file name back to its kind. Other names are not
    /// part of the format and map to `None`.
    pub fn from_dump_file(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.dump_file() == name)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Account => "account",
            RecordKind::Payment => "payment",
            RecordKind::Favorite => "favorite",
        };
        f.write_str(name)
    }
}

/// How dump decoding treats an integer field that does not parse.
///
/// The historical format was written by hand and tolerated garbage in
/// integer positions, so `Lenient` is the default. Status tags and record
/// structure are validated under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// An unparseable integer field aborts the decode.
    Strict,

    /// An unparseable integer field is coerced to zero and logged.
    #[default]
    Lenient,
}

/// A semantic failure while converting a raw record to its domain type.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// An integer field did not parse under the strict policy.
    #[error("field `{field}` is not a base-10 integer: {source}")]
    InvalidInt {
        field: &'static str,
        source: std::num::ParseIntError,
    },

    /// A payment status tag outside the known set.
    #[error(transparent)]
    Status(#[from] UnknownStatus),
}

/// Parses an integer field per the policy; `Lenient` coerces to zero.
fn parse_i64(
    kind: RecordKind,
    field: &'static str,
    value: &str,
    policy: ParsePolicy,
) -> Result<i64, DecodeError> {
    match i64::from_str(value) {
        Ok(n) => Ok(n),
        Err(source) => match policy {
            ParsePolicy::Strict => Err(DecodeError::InvalidInt { field, source }),
            ParsePolicy::Lenient => {
                warn!(
                    "{} field `{}` value {:?} is not a base-10 integer, defaulting to 0",
                    kind, field, value
                );
                Ok(0)
            }
        },
    }
}

/// Wire mirror of an [`Account`]: `ID;Phone;Balance`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawAccount {
    pub id: String,
    pub phone: String,
    pub balance: String,
}

impl RawAccount {
    pub fn from_account(account: &Account) -> Self {
        RawAccount {
            id: account.id.to_string(),
            phone: account.phone.clone(),
            balance: account.balance.to_string(),
        }
    }

    pub fn into_account(self, policy: ParsePolicy) -> Result<Account, DecodeError> {
        Ok(Account {
            id: parse_i64(RecordKind::Account, "id", &self.id, policy)?,
            phone: self.phone,
            balance: Money::new(parse_i64(RecordKind::Account, "balance", &self.balance, policy)?),
        })
    }
}

/// Wire mirror of a [`Payment`]: `ID;AccountID;Amount;Category;Status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawPayment {
    pub id: String,
    pub account_id: String,
    pub amount: String,
    pub category: String,
    pub status: String,
}

impl RawPayment {
    pub fn from_payment(payment: &Payment) -> Self {
        RawPayment {
            id: payment.id.clone(),
            account_id: payment.account_id.to_string(),
            amount: payment.amount.to_string(),
            category: payment.category.clone(),
            status: payment.status.to_string(),
        }
    }

    pub fn into_payment(self, policy: ParsePolicy) -> Result<Payment, DecodeError> {
        Ok(Payment {
            account_id: parse_i64(RecordKind::Payment, "account_id", &self.account_id, policy)?,
            amount: Money::new(parse_i64(RecordKind::Payment, "amount", &self.amount, policy)?),
            status: PaymentStatus::from_str(&self.status)?,
            id: self.id,
            category: self.category,
        })
    }
}

/// Wire mirror of a [`Favorite`]: `ID;AccountID;Name;Amount;Category`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawFavorite {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub amount: String,
    pub category: String,
}

impl RawFavorite {
    pub fn from_favorite(favorite: &Favorite) -> Self {
        RawFavorite {
            id: favorite.id.clone(),
            account_id: favorite.account_id.to_string(),
            name: favorite.name.clone(),
            amount: favorite.amount.to_string(),
            category: favorite.category.clone(),
        }
    }

    pub fn into_favorite(self, policy: ParsePolicy) -> Result<Favorite, DecodeError> {
        Ok(Favorite {
            account_id: parse_i64(RecordKind::Favorite, "account_id", &self.account_id, policy)?,
            amount: Money::new(parse_i64(RecordKind::Favorite, "amount", &self.amount, policy)?),
            id: self.id,
            name: self.name,
            category: self.category,
        })
    }
}

/// Reader over the bulk account format (`|`-terminated records).
pub fn bulk_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .terminator(Terminator::Any(BULK_TERMINATOR))
        .has_headers(false)
        .from_reader(reader)
}

/// Writer producing the bulk account format.
pub fn bulk_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .terminator(Terminator::Any(BULK_TERMINATOR))
        .has_headers(false)
        .from_writer(writer)
}

/// Reader over a dump file (newline-terminated records).
pub fn dump_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .from_reader(reader)
}

/// Writer producing dump lines.
pub fn dump_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .from_writer(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_account(id: &str, phone: &str, balance: &str) -> RawAccount {
        RawAccount {
            id: id.to_string(),
            phone: phone.to_string(),
            balance: balance.to_string(),
        }
    }

    #[test]
    fn test_account_conversion_round_trip() {
        let account = Account {
            id: 3,
            phone: "+992900000003".to_string(),
            balance: Money::new(50_00),
        };

        let raw = RawAccount::from_account(&account);
        let back = raw.into_account(ParsePolicy::Strict).unwrap();
        assert_eq!(back, account);
    }

    #[test]
    fn test_strict_policy_rejects_bad_integer() {
        let raw = raw_account("1", "+992900000001", "not-a-number");
        let err = raw.into_account(ParsePolicy::Strict).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidInt { field: "balance", .. }));
    }

    #[test]
    fn test_lenient_policy_defaults_bad_integer_to_zero() {
        let raw = raw_account("1", "+992900000001", "not-a-number");
        let account = raw.into_account(ParsePolicy::Lenient).unwrap();
        assert_eq!(account.balance, Money::ZERO);
        assert_eq!(account.id, 1);
    }

    #[test]
    fn test_unknown_status_fails_under_both_policies() {
        for policy in [ParsePolicy::Strict, ParsePolicy::Lenient] {
            let raw = RawPayment {
                id: "p-1".to_string(),
                account_id: "1".to_string(),
                amount: "100".to_string(),
                category: "Auto".to_string(),
                status: "PENDING".to_string(),
            };
            let err = raw.into_payment(policy).unwrap_err();
            assert!(matches!(err, DecodeError::Status(_)));
        }
    }

    #[test]
    fn test_bulk_writer_produces_pipe_terminated_stream() {
        let mut writer = bulk_writer(Vec::new());
        writer
            .serialize(raw_account("1", "+992900000001", "1000"))
            .unwrap();
        writer
            .serialize(raw_account("2", "+992900000002", "2500"))
            .unwrap();
        let bytes = writer.into_inner().unwrap();

        let output = String::from_utf8(bytes).unwrap();
        assert_eq!(output, "1;+992900000001;1000|2;+992900000002;2500|");
    }

    #[test]
    fn test_bulk_reader_splits_on_pipe() {
        let mut reader = bulk_reader("1;+992900000001;1000|2;+992900000002;2500|".as_bytes());
        let records: Vec<RawAccount> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].phone, "+992900000002");
    }

    #[test]
    fn test_dump_writer_produces_newline_terminated_lines() {
        let mut writer = dump_writer(Vec::new());
        writer
            .serialize(RawPayment {
                id: "p-1".to_string(),
                account_id: "1".to_string(),
                amount: "100".to_string(),
                category: "Auto".to_string(),
                status: "INPROGRESS".to_string(),
            })
            .unwrap();
        let bytes = writer.into_inner().unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), "p-1;1;100;Auto;INPROGRESS\n");
    }

    #[test]
    fn test_dump_reader_strips_crlf() {
        let mut reader = dump_reader("1;+992900000001;1000\r\n".as_bytes());
        let records: Vec<RawAccount> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].balance, "1000");
    }

    #[test]
    fn test_dump_reader_accepts_unterminated_final_line() {
        let mut reader = dump_reader("1;+992900000001;1000".as_bytes());
        let records: Vec<RawAccount> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_separator_bearing_field_is_quoted_and_recovered() {
        let favorite = Favorite {
            id: "f-1".to_string(),
            account_id: 1,
            name: "rent;utilities".to_string(),
            amount: Money::new(500_00),
            category: "Home".to_string(),
        };

        let mut writer = dump_writer(Vec::new());
        writer.serialize(RawFavorite::from_favorite(&favorite)).unwrap();
        let bytes = writer.into_inner().unwrap();

        let mut reader = dump_reader(bytes.as_slice());
        let raw: RawFavorite = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(raw.into_favorite(ParsePolicy::Strict).unwrap(), favorite);
    }

    #[test]
    fn test_record_kind_dump_file_mapping() {
        assert_eq!(RecordKind::from_dump_file("accounts.dump"), Some(RecordKind::Account));
        assert_eq!(RecordKind::from_dump_file("payments.dump"), Some(RecordKind::Payment));
        assert_eq!(RecordKind::from_dump_file("favorites.dump"), Some(RecordKind::Favorite));
        assert_eq!(RecordKind::from_dump_file("notes.txt"), None);
    }
}
