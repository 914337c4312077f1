//! Favorite payment templates.

use crate::account::AccountId;
use crate::money::Money;
use crate::payment::Payment;

/// A named template derived from a past payment, used to quickly re-pay.
///
/// The account, amount and category are denormalized from the source payment
/// at creation time; a favorite is immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    /// Unique token.
    pub id: String,

    /// Account the source payment was made from.
    pub account_id: AccountId,

    /// Caller-supplied label.
    pub name: String,

    /// Amount in minor currency units. Positive at creation.
    pub amount: Money,

    /// Category tag of the source payment.
    pub category: String,
}

impl Favorite {
    /// Creates a favorite from a source payment with a fresh ID.
    pub fn from_payment(id: String, name: &str, payment: &Payment) -> Self {
        Favorite {
            id,
            account_id: payment.account_id,
            name: name.to_string(),
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentStatus;

    #[test]
    fn test_from_payment_denormalizes_fields() {
        let payment = Payment {
            id: "p-1".to_string(),
            account_id: 7,
            amount: Money::new(25_00),
            category: "IT".to_string(),
            status: PaymentStatus::InProgress,
        };

        let favorite = Favorite::from_payment("f-1".to_string(), "hosting", &payment);
        assert_eq!(favorite.id, "f-1");
        assert_eq!(favorite.account_id, 7);
        assert_eq!(favorite.name, "hosting");
        assert_eq!(favorite.amount, Money::new(25_00));
        assert_eq!(favorite.category, "IT");
    }
}
