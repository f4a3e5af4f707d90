//! Error types for the bank core

use thiserror::Error;

/// Result type for bank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bank core errors
///
/// Every failure maps 1:1 to a boundary error; none of them leave partial
/// state behind.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed required argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No account under the given bank and account number
    #[error("Account not found: {bank}:{account}")]
    AccountNotFound {
        /// Bank code looked up
        bank: String,
        /// Account number looked up
        account: String,
    },

    /// Balance cannot cover the requested amount
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the check
        balance: i64,
        /// Amount requested
        requested: i64,
    },

    /// PIN does not match the stored credential
    #[error("PIN verification failed")]
    InvalidPin,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal failure
    #[error("{0}")]
    Internal(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Internal(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Internal(msg.to_string())
    }
}
