//! Account model and balance operations.
//!
//! Accounts are created by registration, mutated by deposits, payments and
//! refunds, and never deleted. Under normal ledger operation the balance
//! never goes negative (payments are checked against it first).

use crate::money::Money;

/// Sequential account identifier, assigned by the ledger starting at 1.
pub type AccountId = i64;

/// A balance-holding entity identified by a phone number.
///
/// # Invariants
///
/// - `id` is unique across the ledger and monotonically assigned
/// - `phone` is unique across the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique sequential identifier (≥ 1).
    pub id: AccountId,

    /// Phone number the account was registered with.
    pub phone: String,

    /// Current balance in minor currency units.
    pub balance: Money,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(id: AccountId, phone: &str) -> Self {
        Account {
            id,
            phone: phone.to_string(),
            balance: Money::ZERO,
        }
    }

    /// Credits the balance. Used by deposits and refunds.
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Debits the balance.
    ///
    /// Returns `false` and leaves the balance unchanged if it is smaller
    /// than `amount`.
    pub fn debit(&mut self, amount: Money) -> bool {
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_has_zero_balance() {
        let account = Account::new(1, "+992000000001");
        assert_eq!(account.id, 1);
        assert_eq!(account.phone, "+992000000001");
        assert_eq!(account.balance, Money::ZERO);
    }

    #[test]
    fn test_credit_increases_balance() {
        let mut account = Account::new(1, "+992000000001");
        account.credit(Money::new(100_00));
        account.credit(Money::new(5_00));
        assert_eq!(account.balance, Money::new(105_00));
    }

    #[test]
    fn test_debit_decreases_balance() {
        let mut account = Account::new(1, "+992000000001");
        account.credit(Money::new(100_00));

        assert!(account.debit(Money::new(30_00)));
        assert_eq!(account.balance, Money::new(70_00));
    }

    #[test]
    fn test_debit_fails_on_insufficient_balance() {
        let mut account = Account::new(1, "+992000000001");
        account.credit(Money::new(10_00));

        assert!(!account.debit(Money::new(15_00)));
        assert_eq!(account.balance, Money::new(10_00));
    }

    #[test]
    fn test_debit_exact_balance_reaches_zero() {
        let mut account = Account::new(1, "+992000000001");
        account.credit(Money::new(10_00));

        assert!(account.debit(Money::new(10_00)));
        assert_eq!(account.balance, Money::ZERO);
    }
}
