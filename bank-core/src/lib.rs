//! FarePay Bank Core
//!
//! In-memory mock of the bank transfer rails behind the FarePay top-up flow:
//! a seeded account ledger, PIN-authenticated transfers, time-bounded virtual
//! deposit accounts, and an append-only transaction history.
//!
//! # Architecture
//!
//! - **Single Service Instance**: All mutable state is owned by one
//!   [`BankService`] constructed at startup; nothing is global
//! - **Per-Account Serialization**: Balance check and debit happen atomically
//!   under the account's map entry lock
//! - **Lazy Expiry**: Virtual accounts carry an expiry timestamp checked at
//!   lookup; a background sweep reclaims memory
//!
//! # Invariants
//!
//! - Balances never go negative
//! - A failed transfer leaves ledger and history untouched
//! - Transaction records are immutable and appended in timestamp order
//! - Expired virtual accounts are never returned, swept or not

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod config;
pub mod error;
pub mod history;
pub mod idgen;
pub mod ledger;
pub mod metrics;
pub mod pin;
pub mod registry;
pub mod service;
pub mod transfer;
pub mod types;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use service::BankService;
pub use types::{
    AccountKey, AccountSummary, BankAccount, TransactionRecord, TransactionStatus,
    TransferReceipt, VirtualAccount,
};
