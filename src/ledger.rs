//! Core record store and domain operations.
//!
//! The ledger owns three insertion-ordered record sequences and enforces the
//! uniqueness and referential constraints between them. It is an explicit
//! value owned by the caller; there is no global instance, and no locking —
//! concurrent callers must serialize externally.

use crate::account::{Account, AccountId};
use crate::error::{LedgerError, Result};
use crate::favorite::Favorite;
use crate::money::Money;
use crate::payment::{Payment, PaymentStatus};
use log::debug;
use uuid::Uuid;

/// Outcome of merging an imported record into the store.
///
/// `Updated` means a record with the same ID already existed and had all of
/// its fields overwritten in place; `Created` means the record was appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
}

/// The in-memory ledger of accounts, payments and favorites.
///
/// All lookups are linear scans over insertion-ordered sequences; the data
/// sets this serves are small and the scan keeps insertion order observable
/// through the accessors and the exporters.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Highest account ID handed out so far.
    next_account_id: AccountId,

    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
}

impl Ledger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account under the given phone number.
    ///
    /// Fails with `PhoneAlreadyRegistered` if any account holds the phone.
    /// The new account gets the next sequential ID and a zero balance.
    pub fn register_account(&mut self, phone: &str) -> Result<Account> {
        if self.accounts.iter().any(|account| account.phone == phone) {
            return Err(LedgerError::PhoneAlreadyRegistered(phone.to_string()));
        }

        self.next_account_id += 1;
        let account = Account::new(self.next_account_id, phone);
        self.accounts.push(account.clone());

        debug!("registered account {} for phone {}", account.id, phone);
        Ok(account)
    }

    /// Credits an account balance.
    ///
    /// Fails with `AmountMustBePositive` for non-positive amounts before
    /// the account is looked up.
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::AmountMustBePositive);
        }

        let account = self.find_account_mut(account_id)?;
        account.credit(amount);

        debug!("deposited {} to account {}", amount, account_id);
        Ok(())
    }

    /// Debits an account and records a new payment in the `InProgress`
    /// status under a fresh UUID.
    ///
    /// Fails with `AmountMustBePositive`, `AccountNotFound` or
    /// `InsufficientBalance`, in that precedence; no state changes on any
    /// error path.
    pub fn pay(&mut self, account_id: AccountId, amount: Money, category: &str) -> Result<Payment> {
        if !amount.is_positive() {
            return Err(LedgerError::AmountMustBePositive);
        }

        let account = self.find_account_mut(account_id)?;
        if !account.debit(amount) {
            return Err(LedgerError::InsufficientBalance(account_id));
        }

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            account_id,
            amount,
            category: category.to_string(),
            status: PaymentStatus::InProgress,
        };
        self.payments.push(payment.clone());

        debug!("payment {} of {} from account {}", payment.id, amount, account_id);
        Ok(payment)
    }

    /// Finds an account by its sequential ID.
    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    /// Finds a payment by its token.
    pub fn find_payment_by_id(&self, payment_id: &str) -> Result<&Payment> {
        self.payments
            .iter()
            .find(|payment| payment.id == payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))
    }

    /// Finds a favorite by its token.
    pub fn find_favorite_by_id(&self, favorite_id: &str) -> Result<&Favorite> {
        self.favorites
            .iter()
            .find(|favorite| favorite.id == favorite_id)
            .ok_or_else(|| LedgerError::FavoriteNotFound(favorite_id.to_string()))
    }

    /// Rejects an in-progress payment: sets its status to `Fail` and
    /// credits the full amount back to the owning account.
    ///
    /// A payment that is already terminal fails with `PaymentNotInProgress`
    /// and is left untouched, so a payment can never be refunded twice.
    pub fn reject(&mut self, payment_id: &str) -> Result<()> {
        let payment_idx = self
            .payments
            .iter()
            .position(|payment| payment.id == payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))?;

        let payment = &self.payments[payment_idx];
        if !payment.is_in_progress() {
            return Err(LedgerError::PaymentNotInProgress(payment_id.to_string()));
        }
        let account_id = payment.account_id;
        let amount = payment.amount;

        let account_idx = self
            .accounts
            .iter()
            .position(|account| account.id == account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        self.payments[payment_idx].status = PaymentStatus::Fail;
        self.accounts[account_idx].credit(amount);

        debug!("rejected payment {}, refunded {} to account {}", payment_id, amount, account_id);
        Ok(())
    }

    /// Repeats a payment: a fresh `pay` with the original payment's
    /// account, amount and category. The new payment gets its own ID, and
    /// the balance check applies at repeat time.
    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment> {
        let (account_id, amount, category) = {
            let payment = self.find_payment_by_id(payment_id)?;
            (payment.account_id, payment.amount, payment.category.clone())
        };
        self.pay(account_id, amount, &category)
    }

    /// Creates a named favorite from an existing payment.
    ///
    /// The duplicate check compares stored favorite IDs against the source
    /// payment's ID, so it only fires when a favorite carrying that exact
    /// ID exists (which is reachable through a dump import).
    pub fn favorite_payment(&mut self, payment_id: &str, name: &str) -> Result<Favorite> {
        let payment = self.find_payment_by_id(payment_id)?;
        if self.favorites.iter().any(|favorite| favorite.id == payment.id) {
            return Err(LedgerError::PaymentAlreadyFavorited(payment_id.to_string()));
        }

        let favorite = Favorite::from_payment(Uuid::new_v4().to_string(), name, payment);
        self.favorites.push(favorite.clone());

        debug!("favorited payment {} as {}", payment_id, favorite.id);
        Ok(favorite)
    }

    /// Pays again from a favorite template.
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment> {
        let (account_id, amount, category) = {
            let favorite = self.find_favorite_by_id(favorite_id)?;
            (favorite.account_id, favorite.amount, favorite.category.clone())
        };
        self.pay(account_id, amount, &category)
    }

    /// Merges an imported account: overwrites the fields of an existing
    /// account with the same ID, otherwise appends.
    ///
    /// On append the sequential ID counter advances to at least the merged
    /// ID so later registrations cannot collide with imported accounts.
    pub fn merge_account(&mut self, account: Account) -> MergeOutcome {
        match self.accounts.iter_mut().find(|existing| existing.id == account.id) {
            Some(existing) => {
                *existing = account;
                MergeOutcome::Updated
            }
            None => {
                self.next_account_id = self.next_account_id.max(account.id);
                self.accounts.push(account);
                MergeOutcome::Created
            }
        }
    }

    /// Merges an imported payment by ID: overwrite in place or append.
    pub fn merge_payment(&mut self, payment: Payment) -> MergeOutcome {
        match self.payments.iter_mut().find(|existing| existing.id == payment.id) {
            Some(existing) => {
                *existing = payment;
                MergeOutcome::Updated
            }
            None => {
                self.payments.push(payment);
                MergeOutcome::Created
            }
        }
    }

    /// Merges an imported favorite by ID: overwrite in place or append.
    pub fn merge_favorite(&mut self, favorite: Favorite) -> MergeOutcome {
        match self.favorites.iter_mut().find(|existing| existing.id == favorite.id) {
            Some(existing) => {
                *existing = favorite;
                MergeOutcome::Updated
            }
            None => {
                self.favorites.push(favorite);
                MergeOutcome::Created
            }
        }
    }

    /// All accounts in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All payments in insertion order.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// All favorites in insertion order.
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Appends an account without any merge or counter bookkeeping.
    /// Bulk import contract: duplicates are the caller's problem.
    pub(crate) fn append_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    fn find_account_mut(&mut self, account_id: AccountId) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))
    }
}
