//! The bank service facade
//!
//! One [`BankService`] instance owns all mutable state for the process:
//! ledger, virtual account registry, transaction history, id generator,
//! metrics. It is constructed once at startup from a [`Config`] and exposes
//! the channel operations as async methods.

use crate::config::Config;
use crate::history::TransactionHistory;
use crate::idgen::IdGenerator;
use crate::ledger::AccountLedger;
use crate::metrics::Metrics;
use crate::pin::PinHasher;
use crate::registry::{CreateVirtualAccount, VirtualAccountRegistry};
use crate::transfer::{TransferProcessor, TransferRequest};
use crate::types::{
    AccountSummary, BankAccount, TransactionRecord, TransferReceipt, VirtualAccount,
};
use crate::{Error, Result};
use std::sync::Arc;

/// Single-instance mock bank rails.
#[derive(Debug)]
pub struct BankService {
    ledger: Arc<AccountLedger>,
    registry: Arc<VirtualAccountRegistry>,
    history: Arc<TransactionHistory>,
    idgen: Arc<IdGenerator>,
    processor: TransferProcessor,
    hasher: PinHasher,
    metrics: Metrics,
    config: Config,
}

impl BankService {
    /// Build the service and seed the ledger from the configured fixtures.
    pub fn new(config: Config) -> Self {
        let hasher = PinHasher::new();
        let ledger = Arc::new(AccountLedger::new());
        for seed in &config.seed_accounts {
            ledger.insert(BankAccount {
                bank: seed.bank.clone(),
                bank_name: seed.bank_name.clone(),
                account: seed.account.clone(),
                holder: seed.holder.clone(),
                balance: seed.balance,
                credential: hasher.hash(&seed.pin),
                is_default: seed.is_default,
            });
        }
        tracing::info!(accounts = ledger.len(), "Seeded account ledger");

        let idgen = Arc::new(IdGenerator::new());
        let registry = Arc::new(VirtualAccountRegistry::new(
            config.virtual_account.clone(),
            Arc::clone(&idgen),
        ));
        let history = Arc::new(TransactionHistory::new());
        let processor = TransferProcessor::new(
            Arc::clone(&ledger),
            Arc::clone(&history),
            Arc::clone(&idgen),
            config.latency.clone(),
        );

        Self {
            ledger,
            registry,
            history,
            idgen,
            processor,
            hasher,
            metrics: Metrics::default(),
            config,
        }
    }

    /// Spawn the background expiry sweep for virtual accounts.
    ///
    /// Reclaims memory only; lookups already enforce expiry on their own.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(&self.registry);
        let metrics = self.metrics.clone();
        let period = registry.sweep_interval();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let removed = registry.sweep_expired();
                if removed > 0 {
                    metrics.record_virtual_accounts_swept(removed);
                }
            }
        })
    }

    /// Issue a virtual deposit account for a top-up.
    pub fn create_virtual_account(
        &self,
        user_id: &str,
        amount: i64,
        card_type: &str,
        card_number: &str,
        expire_minutes: Option<i64>,
    ) -> Result<VirtualAccount> {
        if user_id.is_empty() {
            return Err(Error::InvalidArgument("userId required".to_string()));
        }
        if card_type.is_empty() {
            return Err(Error::InvalidArgument("cardType required".to_string()));
        }
        if card_number.is_empty() {
            return Err(Error::InvalidArgument("cardNumber required".to_string()));
        }

        let account = self.registry.create(CreateVirtualAccount {
            user_id: user_id.to_string(),
            amount,
            card_type: card_type.to_string(),
            card_number: card_number.to_string(),
            expire_minutes: expire_minutes
                .unwrap_or(self.config.virtual_account.default_expire_minutes),
        })?;
        self.metrics.record_virtual_account_created();
        Ok(account)
    }

    /// Look up a virtual account; expired accounts are gone.
    pub fn lookup_virtual_account(&self, account_number: &str) -> Option<VirtualAccount> {
        self.registry.lookup(account_number)
    }

    /// Run a PIN-authenticated transfer.
    pub async fn process_transfer(&self, request: TransferRequest) -> Result<TransferReceipt> {
        match self.processor.process(request).await {
            Ok(receipt) => {
                self.metrics.record_transfer(receipt.amount);
                Ok(receipt)
            }
            Err(err) => {
                self.metrics.record_transfer_failure();
                tracing::warn!(error = %err, "Transfer failed");
                Err(err)
            }
        }
    }

    /// Soft account validation: existence plus holder-name match.
    pub async fn validate_account(&self, bank: &str, account: &str, holder: &str) -> Result<bool> {
        if bank.is_empty() || account.is_empty() || holder.is_empty() {
            return Err(Error::InvalidArgument(
                "bank, account and holder required".to_string(),
            ));
        }

        if let Some(ms) = self.config.latency.delay_ms(self.config.latency.validate_ms) {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }

        Ok(self.ledger.validate(bank, account, holder))
    }

    /// Public summaries of the user's accounts, live balances included.
    pub fn user_accounts(&self, user_id: &str) -> Result<Vec<AccountSummary>> {
        if user_id.is_empty() {
            return Err(Error::InvalidArgument("userId required".to_string()));
        }
        Ok(self.ledger.summaries())
    }

    /// PIN-authenticated balance query.
    pub async fn balance(&self, bank: &str, account: &str, pin: &str) -> Result<i64> {
        if bank.is_empty() || account.is_empty() || pin.is_empty() {
            return Err(Error::InvalidArgument(
                "bank, account and pin required".to_string(),
            ));
        }

        if let Some(ms) = self.config.latency.delay_ms(self.config.latency.balance_ms) {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }

        let found = self
            .ledger
            .lookup(bank, account)
            .ok_or_else(|| Error::AccountNotFound {
                bank: bank.to_string(),
                account: account.to_string(),
            })?;

        if !self.hasher.verify(pin, &found.credential) {
            return Err(Error::InvalidPin);
        }

        Ok(found.balance)
    }

    /// The user's most recent transfers, oldest-first within the window.
    pub fn transfer_history(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TransactionRecord>> {
        if user_id.is_empty() {
            return Err(Error::InvalidArgument("userId required".to_string()));
        }
        let limit = limit.unwrap_or(self.config.history.default_limit);
        Ok(self.history.recent(limit))
    }

    /// Shared id generator, for boundary callers that tag provider ids.
    pub fn idgen(&self) -> Arc<IdGenerator> {
        Arc::clone(&self.idgen)
    }

    /// Service configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Service metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
