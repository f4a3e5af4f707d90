//! Transfer orchestration
//!
//! A transfer runs a fixed pipeline: argument validation, simulated rail
//! latency, account lookup, funds check, PIN verification, atomic debit,
//! history append. Every check short-circuits with its own error and leaves
//! no partial effect; the ledger mutates only after all checks pass, so no
//! rollback path exists.

use crate::config::LatencyConfig;
use crate::history::TransactionHistory;
use crate::idgen::IdGenerator;
use crate::ledger::AccountLedger;
use crate::pin::PinHasher;
use crate::types::{TransactionRecord, TransactionStatus, TransferReceipt};
use crate::{Error, Result};
use chrono::Utc;
use std::sync::Arc;

/// Arguments of a transfer call.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Source bank code
    pub from_bank: String,
    /// Source account number
    pub from_account: String,
    /// Source account holder name
    pub account_holder: String,
    /// Amount to transfer (minor units)
    pub amount: i64,
    /// PIN in clear, verified against the stored credential
    pub pin: String,
    /// Card funded by this transfer
    pub card_id: String,
}

/// Processes transfers against the ledger and records them in the history.
#[derive(Debug)]
pub struct TransferProcessor {
    ledger: Arc<AccountLedger>,
    history: Arc<TransactionHistory>,
    idgen: Arc<IdGenerator>,
    hasher: PinHasher,
    latency: LatencyConfig,
}

impl TransferProcessor {
    /// Create a processor over shared ledger state.
    pub fn new(
        ledger: Arc<AccountLedger>,
        history: Arc<TransactionHistory>,
        idgen: Arc<IdGenerator>,
        latency: LatencyConfig,
    ) -> Self {
        Self {
            ledger,
            history,
            idgen,
            hasher: PinHasher::new(),
            latency,
        }
    }

    /// Run a transfer to completion or to its first failing check.
    pub async fn process(&self, request: TransferRequest) -> Result<TransferReceipt> {
        self.validate_request(&request)?;

        // Simulated rail latency. Pure scheduling delay; no lock is held here.
        if let Some(ms) = self.latency.delay_ms(self.latency.transfer_ms) {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }

        let account = self
            .ledger
            .lookup(&request.from_bank, &request.from_account)
            .ok_or_else(|| Error::AccountNotFound {
                bank: request.from_bank.clone(),
                account: request.from_account.clone(),
            })?;

        if account.balance < request.amount {
            return Err(Error::InsufficientFunds {
                balance: account.balance,
                requested: request.amount,
            });
        }

        if !self.hasher.verify(&request.pin, &account.credential) {
            return Err(Error::InvalidPin);
        }

        // The debit re-checks funds under the entry lock; when two transfers
        // race past the pre-check above, only one can pass here.
        let new_balance = self
            .ledger
            .debit(&request.from_bank, &request.from_account, request.amount)?;

        let transaction_id = self.idgen.next_transaction_id();
        let completed_at = Utc::now();

        self.history.append(TransactionRecord {
            transaction_id: transaction_id.clone(),
            from_bank: request.from_bank.clone(),
            from_account: request.from_account.clone(),
            amount: request.amount,
            timestamp: completed_at,
            card_id: request.card_id.clone(),
            status: TransactionStatus::Success,
        });

        tracing::info!(
            transaction_id = %transaction_id,
            from = %format!("{}:{}", request.from_bank, request.from_account),
            amount = request.amount,
            new_balance,
            "Transfer completed"
        );

        Ok(TransferReceipt {
            transaction_id,
            amount: request.amount,
            completed_at,
            new_balance,
        })
    }

    /// Check required fields before anything else runs.
    fn validate_request(&self, request: &TransferRequest) -> Result<()> {
        if request.from_bank.is_empty() {
            return Err(Error::InvalidArgument("fromBank required".to_string()));
        }
        if request.from_account.is_empty() {
            return Err(Error::InvalidArgument("fromAccount required".to_string()));
        }
        if request.account_holder.is_empty() {
            return Err(Error::InvalidArgument("accountHolder required".to_string()));
        }
        if request.pin.is_empty() {
            return Err(Error::InvalidArgument("pin required".to_string()));
        }
        if request.card_id.is_empty() {
            return Err(Error::InvalidArgument("cardId required".to_string()));
        }
        if request.amount <= 0 {
            return Err(Error::InvalidArgument(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }
        Ok(())
    }
}
