//! Core types for the mock bank rails
//!
//! All types are designed for:
//! - JSON marshalling at the channel boundary (serde)
//! - Exact arithmetic (integer minor currency units)
//! - UTC timestamps (ISO-8601 at the boundary)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger key for a bank account: `"<bank_code>:<account_number>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountKey(String);

impl AccountKey {
    /// Build a key from bank code and account number.
    pub fn new(bank: impl AsRef<str>, account: impl AsRef<str>) -> Self {
        Self(format!("{}:{}", bank.as_ref(), account.as_ref()))
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seeded bank account held in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Bank code (e.g. `KB`, `SHINHAN`)
    pub bank: String,

    /// Display name of the bank
    pub bank_name: String,

    /// Account number
    pub account: String,

    /// Account holder name
    pub holder: String,

    /// Balance in minor currency units; never negative
    pub balance: i64,

    /// Hex-encoded one-way transform of the PIN; never the PIN itself
    pub credential: String,

    /// Whether this is the holder's default account
    pub is_default: bool,
}

impl BankAccount {
    /// Ledger key for this account.
    pub fn key(&self) -> AccountKey {
        AccountKey::new(&self.bank, &self.account)
    }
}

/// Public view of a bank account, without the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSummary {
    /// Bank code
    pub bank: String,
    /// Display name of the bank
    pub bank_name: String,
    /// Account number
    pub account_number: String,
    /// Account holder name
    pub account_holder: String,
    /// Current balance (live, minor units)
    pub balance: i64,
    /// Whether this is the holder's default account
    pub is_default: bool,
}

impl From<&BankAccount> for AccountSummary {
    fn from(account: &BankAccount) -> Self {
        Self {
            bank: account.bank.clone(),
            bank_name: account.bank_name.clone(),
            account_number: account.account.clone(),
            account_holder: account.holder.clone(),
            balance: account.balance,
            is_default: account.is_default,
        }
    }
}

/// A short-lived virtual deposit account issued for a top-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualAccount {
    /// Generated 14-digit account number; globally unique in the registry
    pub account_number: String,

    /// Display name of the issuing bank
    pub bank_name: String,

    /// Bank code of the issuing bank
    pub bank_code: String,

    /// Amount expected to be deposited (minor units)
    pub amount: i64,

    /// Instant after which the account must never be returned
    pub expire_at: DateTime<Utc>,

    /// Depositor label shown to the payer
    pub depositor_name: String,

    /// Owning user
    pub user_id: String,

    /// Card type being topped up
    pub card_type: String,

    /// Card number being topped up
    pub card_number: String,
}

impl VirtualAccount {
    /// Whether this account is past its expiry at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expire_at
    }
}

/// Terminal status of a recorded transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Transfer completed and debited
    Success,
}

impl TransactionStatus {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "SUCCESS",
        }
    }
}

/// Immutable record of a completed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Generated transaction id (`TXN_`-prefixed)
    pub transaction_id: String,

    /// Source bank code
    pub from_bank: String,

    /// Source account number
    pub from_account: String,

    /// Transferred amount (minor units)
    pub amount: i64,

    /// Completion timestamp
    pub timestamp: DateTime<Utc>,

    /// Card funded by this transfer
    pub card_id: String,

    /// Terminal status
    pub status: TransactionStatus,
}

/// Structured success result of a completed transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Generated transaction id
    pub transaction_id: String,

    /// Transferred amount (minor units)
    pub amount: i64,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,

    /// Source account balance after the debit
    pub new_balance: i64,
}

/// Format a timestamp the way the channel boundary expects it:
/// ISO-8601 in UTC, seconds precision.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}
