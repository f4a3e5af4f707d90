//! Third-party quick-transfer provider stubs
//!
//! Toss, KakaoPay and NaverPay transfers are stateless delay-and-echo
//! simulations: they touch no ledger state and always succeed once their
//! arguments check out. The provider tag prefixes the generated
//! transaction id so downstream callers can attribute it.

use bank_core::config::LatencyConfig;
use bank_core::idgen::IdGenerator;
use bank_core::{Error, Result};
use std::sync::Arc;

/// A quick-transfer provider simulated by this channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Toss quick transfer
    Toss,
    /// KakaoPay quick transfer
    KakaoPay,
    /// NaverPay quick transfer
    NaverPay,
}

impl Provider {
    /// Prefix stamped onto the provider's transaction ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Provider::Toss => "TOSS_",
            Provider::KakaoPay => "KAKAO_",
            Provider::NaverPay => "NAVER_",
        }
    }

    /// Boundary error code for this provider's failures.
    pub fn error_code(&self) -> &'static str {
        match self {
            Provider::Toss => "TOSS_TRANSFER_ERROR",
            Provider::KakaoPay => "KAKAOPAY_TRANSFER_ERROR",
            Provider::NaverPay => "NAVERPAY_TRANSFER_ERROR",
        }
    }
}

/// Result of a simulated provider transfer.
#[derive(Debug, Clone)]
pub struct ProviderReceipt {
    /// Provider-prefixed transaction id
    pub transaction_id: String,
    /// Echoed amount (minor units)
    pub amount: i64,
}

/// Gateway to the simulated providers.
#[derive(Debug)]
pub struct ProviderGateway {
    idgen: Arc<IdGenerator>,
    latency: LatencyConfig,
}

impl ProviderGateway {
    /// Create a gateway sharing the service's id generator.
    pub fn new(idgen: Arc<IdGenerator>, latency: LatencyConfig) -> Self {
        Self { idgen, latency }
    }

    /// Run a simulated provider transfer.
    pub async fn transfer(
        &self,
        provider: Provider,
        amount: i64,
        card_id: &str,
    ) -> Result<ProviderReceipt> {
        if amount <= 0 {
            return Err(Error::InvalidArgument(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        if card_id.is_empty() {
            return Err(Error::InvalidArgument("cardId required".to_string()));
        }

        if let Some(ms) = self.latency.delay_ms(self.latency.provider_ms) {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }

        let transaction_id = format!("{}{}", provider.id_prefix(), self.idgen.next_transaction_id());
        tracing::info!(
            transaction_id = %transaction_id,
            amount,
            "Provider transfer simulated"
        );

        Ok(ProviderReceipt {
            transaction_id,
            amount,
        })
    }
}
