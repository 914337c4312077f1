//! Payment model and lifecycle status.

use crate::account::AccountId;
use crate::money::Money;
use std::fmt;
use std::str::FromStr;

/// A debit transaction against an account.
///
/// Payments are created in the `InProgress` status and are mutated only by
/// a reject (status becomes `Fail` and the amount is refunded). IDs are
/// UUID v4 tokens and are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    /// Globally unique token.
    pub id: String,

    /// Owning account. Must reference an existing account at creation time.
    pub account_id: AccountId,

    /// Amount debited, in minor currency units. Positive at creation.
    pub amount: Money,

    /// Open-ended category tag ("Auto", "Fun", "IT", ...).
    pub category: String,

    /// Lifecycle status.
    pub status: PaymentStatus,
}

impl Payment {
    /// Returns `true` if a reject may still refund this payment.
    pub fn is_in_progress(&self) -> bool {
        self.status == PaymentStatus::InProgress
    }
}

/// Lifecycle status of a payment.
///
/// The wire form is the uppercase tag (`INPROGRESS`, `OK`, `FAIL`); any
/// other tag is rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Freshly created, refundable via reject.
    InProgress,

    /// Completed successfully. Terminal.
    Ok,

    /// Rejected and refunded. Terminal.
    Fail,
}

impl PaymentStatus {
    /// Canonical wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::InProgress => "INPROGRESS",
            PaymentStatus::Ok => "OK",
            PaymentStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a status tag outside the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment status tag `{}`", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "INPROGRESS" => Ok(PaymentStatus::InProgress),
            "OK" => Ok(PaymentStatus::Ok),
            "FAIL" => Ok(PaymentStatus::Fail),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_tags_round_trip() {
        for status in [PaymentStatus::InProgress, PaymentStatus::Ok, PaymentStatus::Fail] {
            let parsed = PaymentStatus::from_str(status.as_str()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_rejects_unknown_tag() {
        let err = PaymentStatus::from_str("PENDING").unwrap_err();
        assert_eq!(err.0, "PENDING");
    }

    #[test]
    fn test_status_tags_are_matched_exactly() {
        assert!(PaymentStatus::from_str("ok").is_err());
        assert!(PaymentStatus::from_str(" OK").is_err());
    }

    #[test]
    fn test_is_in_progress() {
        let mut payment = Payment {
            id: "p-1".to_string(),
            account_id: 1,
            amount: Money::new(10_00),
            category: "Auto".to_string(),
            status: PaymentStatus::InProgress,
        };
        assert!(payment.is_in_progress());

        payment.status = PaymentStatus::Fail;
        assert!(!payment.is_in_progress());
    }
}
