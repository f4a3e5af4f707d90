//! Configuration for the bank service

use serde::{Deserialize, Serialize};

/// Bank service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Simulated latency configuration
    pub latency: LatencyConfig,

    /// Virtual account issuance configuration
    pub virtual_account: VirtualAccountConfig,

    /// Transfer history configuration
    pub history: HistoryConfig,

    /// Accounts seeded into the ledger at startup
    pub seed_accounts: Vec<SeedAccount>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "bank-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            latency: LatencyConfig::default(),
            virtual_account: VirtualAccountConfig::default(),
            history: HistoryConfig::default(),
            seed_accounts: SeedAccount::fixtures(),
        }
    }
}

/// Simulated processing latency, in milliseconds per operation
///
/// These delays model the upstream rails; they are pure scheduling delays
/// and are never applied while a ledger lock is held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Delay before a transfer is validated
    pub transfer_ms: u64,

    /// Delay for account validation
    pub validate_ms: u64,

    /// Delay for a balance query
    pub balance_ms: u64,

    /// Delay for third-party provider calls
    pub provider_ms: u64,

    /// Master switch; tests run with this off
    pub enabled: bool,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            transfer_ms: 500,
            validate_ms: 300,
            balance_ms: 300,
            provider_ms: 1000,
            enabled: true,
        }
    }
}

impl LatencyConfig {
    /// Zero-delay configuration for tests.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Effective delay for an operation, `None` when latency is off or zero.
    pub fn delay_ms(&self, configured: u64) -> Option<u64> {
        if self.enabled && configured > 0 {
            Some(configured)
        } else {
            None
        }
    }
}

/// Virtual account issuance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualAccountConfig {
    /// Bank code stamped on issued accounts
    pub bank_code: String,

    /// Bank display name stamped on issued accounts
    pub bank_name: String,

    /// Depositor label shown to the payer
    pub depositor_name: String,

    /// TTL applied when the caller does not supply one (minutes)
    pub default_expire_minutes: i64,

    /// Interval between background expiry sweeps (seconds)
    pub sweep_interval_secs: u64,
}

impl Default for VirtualAccountConfig {
    fn default() -> Self {
        Self {
            bank_code: "KB".to_string(),
            bank_name: "KB국민은행".to_string(),
            depositor_name: "FAREPAY_USER".to_string(),
            default_expire_minutes: 30,
            sweep_interval_secs: 60,
        }
    }
}

/// Transfer history query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Result count applied when the caller does not supply a limit
    pub default_limit: usize,

    /// Counterparty label stamped on history rows
    pub counterparty: String,

    /// Row description shown to the user
    pub description: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            counterparty: "FAREPAY_CHARGE".to_string(),
            description: "교통카드 충전".to_string(),
        }
    }
}

/// A fixture account seeded into the ledger at startup
///
/// The PIN is listed in clear here because seeds are test fixtures; the
/// ledger stores only the hashed credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    /// Bank code
    pub bank: String,
    /// Bank display name
    pub bank_name: String,
    /// Account number
    pub account: String,
    /// Holder name
    pub holder: String,
    /// Opening balance (minor units)
    pub balance: i64,
    /// PIN in clear, hashed on seed
    pub pin: String,
    /// Whether this is the holder's default account
    pub is_default: bool,
}

impl SeedAccount {
    /// The stock fixture pair every deployment starts with.
    pub fn fixtures() -> Vec<Self> {
        vec![
            Self {
                bank: "KB".to_string(),
                bank_name: "KB국민은행".to_string(),
                account: "123456789012".to_string(),
                holder: "홍길동".to_string(),
                balance: 50_000,
                pin: "1234".to_string(),
                is_default: true,
            },
            Self {
                bank: "SHINHAN".to_string(),
                bank_name: "신한은행".to_string(),
                account: "987654321098".to_string(),
                holder: "홍길동".to_string(),
                balance: 100_000,
                pin: "1234".to_string(),
                is_default: false,
            },
        ]
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(enabled) = std::env::var("BANK_LATENCY_ENABLED") {
            config.latency.enabled = enabled != "0" && !enabled.eq_ignore_ascii_case("false");
        }

        if let Ok(minutes) = std::env::var("BANK_VA_DEFAULT_EXPIRE_MINUTES") {
            config.virtual_account.default_expire_minutes = minutes
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid expire minutes: {}", e)))?;
        }

        if let Ok(secs) = std::env::var("BANK_VA_SWEEP_INTERVAL_SECS") {
            config.virtual_account.sweep_interval_secs = secs
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid sweep interval: {}", e)))?;
        }

        Ok(config)
    }

    /// Configuration for tests: fixtures seeded, latency off.
    pub fn for_tests() -> Self {
        Self {
            latency: LatencyConfig::disabled(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "bank-core");
        assert_eq!(config.seed_accounts.len(), 2);
        assert_eq!(config.virtual_account.default_expire_minutes, 30);
        assert!(config.latency.enabled);
    }

    #[test]
    fn test_latency_disabled() {
        let latency = LatencyConfig::disabled();
        assert_eq!(latency.delay_ms(500), None);

        let latency = LatencyConfig::default();
        assert_eq!(latency.delay_ms(500), Some(500));
        assert_eq!(latency.delay_ms(0), None);
    }

    #[test]
    fn test_fixture_accounts() {
        let seeds = SeedAccount::fixtures();
        assert_eq!(seeds[0].bank, "KB");
        assert_eq!(seeds[0].balance, 50_000);
        assert!(seeds[0].is_default);
        assert_eq!(seeds[1].bank, "SHINHAN");
        assert_eq!(seeds[1].balance, 100_000);
    }

    #[test]
    fn test_config_roundtrip_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.seed_accounts.len(), config.seed_accounts.len());
        assert_eq!(parsed.latency.transfer_ms, config.latency.transfer_ms);
    }
}
