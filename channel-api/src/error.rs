//! Boundary error representation
//!
//! Every core failure crosses the channel as a `(code, message)` pair. The
//! user-facing messages for ledger failures are fixed Korean strings the
//! mobile clients display as-is; everything else carries the originating
//! error text under the calling method's wrapper code.

use bank_core::Error;
use serde::{Deserialize, Serialize};

/// Structured error returned over the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorBody {
    /// Stable machine-readable code
    pub code: String,

    /// User-facing message
    pub message: String,
}

impl ErrorBody {
    /// Build an error body.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Error for a method the channel does not dispatch.
    pub fn method_not_found(method: &str) -> Self {
        Self::new("METHOD_NOT_FOUND", format!("Unknown method: {}", method))
    }
}

/// Map a core error to its boundary form.
///
/// Ledger failures have fixed codes and verbatim user messages; anything
/// else is wrapped under the calling method's error code.
pub fn map_error(err: Error, method_code: &str) -> ErrorBody {
    match err {
        Error::AccountNotFound { .. } => {
            ErrorBody::new("INVALID_ACCOUNT", "계좌를 찾을 수 없습니다")
        }
        Error::InsufficientFunds { .. } => {
            ErrorBody::new("INSUFFICIENT_BALANCE", "잔액이 부족합니다")
        }
        Error::InvalidPin => ErrorBody::new("INVALID_PIN", "비밀번호가 일치하지 않습니다"),
        other => ErrorBody::new(method_code, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_errors_keep_fixed_messages() {
        let body = map_error(
            Error::AccountNotFound {
                bank: "KB".to_string(),
                account: "1".to_string(),
            },
            "TRANSFER_ERROR",
        );
        assert_eq!(body.code, "INVALID_ACCOUNT");
        assert_eq!(body.message, "계좌를 찾을 수 없습니다");

        let body = map_error(
            Error::InsufficientFunds {
                balance: 10,
                requested: 20,
            },
            "TRANSFER_ERROR",
        );
        assert_eq!(body.code, "INSUFFICIENT_BALANCE");
        assert_eq!(body.message, "잔액이 부족합니다");

        let body = map_error(Error::InvalidPin, "BALANCE_ERROR");
        assert_eq!(body.code, "INVALID_PIN");
        assert_eq!(body.message, "비밀번호가 일치하지 않습니다");
    }

    #[test]
    fn test_other_errors_take_method_code() {
        let body = map_error(
            Error::InvalidArgument("amount required".to_string()),
            "CREATE_VIRTUAL_ACCOUNT_ERROR",
        );
        assert_eq!(body.code, "CREATE_VIRTUAL_ACCOUNT_ERROR");
        assert!(body.message.contains("amount required"));
    }
}
