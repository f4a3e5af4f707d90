//! Metrics collection for observability
//!
//! Prometheus metrics for monitoring the mock rails.
//!
//! # Metrics
//!
//! - `bank_transfers_total` - Completed transfers
//! - `bank_transfer_failures_total` - Failed transfers
//! - `bank_transfer_amount` - Histogram of transferred amounts
//! - `bank_virtual_accounts_created_total` - Virtual accounts issued
//! - `bank_virtual_accounts_swept_total` - Expired virtual accounts reclaimed

use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Completed transfers
    pub transfers_total: IntCounter,

    /// Failed transfers
    pub transfer_failures_total: IntCounter,

    /// Transferred amounts (minor units)
    pub transfer_amount: Histogram,

    /// Virtual accounts issued
    pub virtual_accounts_created_total: IntCounter,

    /// Expired virtual accounts reclaimed by the sweep
    pub virtual_accounts_swept_total: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let transfers_total =
            IntCounter::new("bank_transfers_total", "Completed transfers")?;
        registry.register(Box::new(transfers_total.clone()))?;

        let transfer_failures_total =
            IntCounter::new("bank_transfer_failures_total", "Failed transfers")?;
        registry.register(Box::new(transfer_failures_total.clone()))?;

        let transfer_amount = Histogram::with_opts(
            HistogramOpts::new("bank_transfer_amount", "Transferred amounts (minor units)")
                .buckets(vec![
                    1_000.0, 5_000.0, 10_000.0, 20_000.0, 50_000.0, 100_000.0, 500_000.0,
                ]),
        )?;
        registry.register(Box::new(transfer_amount.clone()))?;

        let virtual_accounts_created_total = IntCounter::new(
            "bank_virtual_accounts_created_total",
            "Virtual accounts issued",
        )?;
        registry.register(Box::new(virtual_accounts_created_total.clone()))?;

        let virtual_accounts_swept_total = IntCounter::new(
            "bank_virtual_accounts_swept_total",
            "Expired virtual accounts reclaimed",
        )?;
        registry.register(Box::new(virtual_accounts_swept_total.clone()))?;

        Ok(Self {
            transfers_total,
            transfer_failures_total,
            transfer_amount,
            virtual_accounts_created_total,
            virtual_accounts_swept_total,
            registry,
        })
    }

    /// Record a completed transfer
    pub fn record_transfer(&self, amount: i64) {
        self.transfers_total.inc();
        self.transfer_amount.observe(amount as f64);
    }

    /// Record a failed transfer
    pub fn record_transfer_failure(&self) {
        self.transfer_failures_total.inc();
    }

    /// Record an issued virtual account
    pub fn record_virtual_account_created(&self) {
        self.virtual_accounts_created_total.inc();
    }

    /// Record reclaimed virtual accounts
    pub fn record_virtual_accounts_swept(&self, count: usize) {
        self.virtual_accounts_swept_total.inc_by(count as u64);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("transfers_total", &self.transfers_total.get())
            .field("transfer_failures_total", &self.transfer_failures_total.get())
            .field(
                "virtual_accounts_created_total",
                &self.virtual_accounts_created_total.get(),
            )
            .field(
                "virtual_accounts_swept_total",
                &self.virtual_accounts_swept_total.get(),
            )
            .finish_non_exhaustive()
    }
}
