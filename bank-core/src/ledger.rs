//! The account ledger
//!
//! Single source of truth for balances and credentials. Accounts live in a
//! concurrent map keyed by `bank:account`; mutations to one account are
//! serialized by its entry lock, which is what makes the
//! check-then-debit sequence atomic per account.

use crate::types::{AccountKey, AccountSummary, BankAccount};
use crate::{Error, Result};
use dashmap::DashMap;

/// In-memory mapping of account identity to balance and credential.
#[derive(Debug, Default)]
pub struct AccountLedger {
    accounts: DashMap<AccountKey, BankAccount>,
}

impl AccountLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Insert an account, replacing any previous entry under the same key.
    pub fn insert(&self, account: BankAccount) {
        self.accounts.insert(account.key(), account);
    }

    /// Number of accounts held.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Look up an account, cloning it out of the map.
    pub fn lookup(&self, bank: &str, account: &str) -> Option<BankAccount> {
        self.accounts
            .get(&AccountKey::new(bank, account))
            .map(|entry| entry.clone())
    }

    /// Debit `amount` from an account.
    ///
    /// The balance check and the subtraction happen under the entry lock:
    /// either the full amount is debited or nothing changes. Two concurrent
    /// debits that jointly exceed the balance cannot both pass.
    pub fn debit(&self, bank: &str, account: &str, amount: i64) -> Result<i64> {
        let key = AccountKey::new(bank, account);
        let mut entry = self
            .accounts
            .get_mut(&key)
            .ok_or_else(|| Error::AccountNotFound {
                bank: bank.to_string(),
                account: account.to_string(),
            })?;

        if entry.balance < amount {
            return Err(Error::InsufficientFunds {
                balance: entry.balance,
                requested: amount,
            });
        }

        entry.balance -= amount;
        Ok(entry.balance)
    }

    /// Soft account validation: the account exists and the holder name
    /// matches. No PIN involved.
    pub fn validate(&self, bank: &str, account: &str, holder: &str) -> bool {
        self.lookup(bank, account)
            .map(|acct| acct.holder == holder)
            .unwrap_or(false)
    }

    /// Stored credential for an account.
    pub fn credential(&self, bank: &str, account: &str) -> Option<String> {
        self.lookup(bank, account).map(|acct| acct.credential)
    }

    /// Current balance of an account.
    pub fn balance(&self, bank: &str, account: &str) -> Option<i64> {
        self.lookup(bank, account).map(|acct| acct.balance)
    }

    /// Public summaries of every account, default account first.
    pub fn summaries(&self) -> Vec<AccountSummary> {
        let mut summaries: Vec<AccountSummary> = self
            .accounts
            .iter()
            .map(|entry| AccountSummary::from(entry.value()))
            .collect();
        summaries.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then_with(|| a.account_number.cmp(&b.account_number))
        });
        summaries
    }
}
