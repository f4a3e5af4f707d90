//! Virtual deposit account registry
//!
//! Issues short-lived virtual accounts used to fund top-ups. Expiry is a
//! per-entry timestamp checked at lookup time; a background sweep only
//! reclaims memory. Correctness never depends on the sweep having run.

use crate::config::VirtualAccountConfig;
use crate::idgen::IdGenerator;
use crate::types::VirtualAccount;
use crate::{Error, Result};
use chrono::{Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Request to issue a virtual account.
#[derive(Debug, Clone)]
pub struct CreateVirtualAccount {
    /// Owning user
    pub user_id: String,
    /// Expected deposit amount (minor units)
    pub amount: i64,
    /// Card type being topped up
    pub card_type: String,
    /// Card number being topped up
    pub card_number: String,
    /// Time to live in minutes; must be positive
    pub expire_minutes: i64,
}

/// Registry of live virtual deposit accounts.
#[derive(Debug)]
pub struct VirtualAccountRegistry {
    accounts: DashMap<String, VirtualAccount>,
    config: VirtualAccountConfig,
    idgen: Arc<IdGenerator>,
}

impl VirtualAccountRegistry {
    /// Create an empty registry.
    pub fn new(config: VirtualAccountConfig, idgen: Arc<IdGenerator>) -> Self {
        Self {
            accounts: DashMap::new(),
            config,
            idgen,
        }
    }

    /// Issue a new virtual account.
    ///
    /// Rejects non-positive TTLs and amounts before any state changes. The
    /// generated account number is regenerated on the rare collision, so a
    /// stored number never silently replaces a live one.
    pub fn create(&self, request: CreateVirtualAccount) -> Result<VirtualAccount> {
        if request.expire_minutes <= 0 {
            return Err(Error::InvalidArgument(format!(
                "expireMinutes must be positive, got {}",
                request.expire_minutes
            )));
        }
        if request.amount <= 0 {
            return Err(Error::InvalidArgument(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }

        let expire_at = Utc::now() + Duration::minutes(request.expire_minutes);

        loop {
            let account_number = self.idgen.next_virtual_account_number();
            match self.accounts.entry(account_number.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(vacant) => {
                    let account = VirtualAccount {
                        account_number,
                        bank_name: self.config.bank_name.clone(),
                        bank_code: self.config.bank_code.clone(),
                        amount: request.amount,
                        expire_at,
                        depositor_name: self.config.depositor_name.clone(),
                        user_id: request.user_id,
                        card_type: request.card_type,
                        card_number: request.card_number,
                    };
                    vacant.insert(account.clone());
                    tracing::info!(
                        account_number = %account.account_number,
                        expire_at = %account.expire_at,
                        "Issued virtual account"
                    );
                    return Ok(account);
                }
            }
        }
    }

    /// Look up a virtual account by number.
    ///
    /// Returns `None` once the current time is past `expire_at`, whether or
    /// not the sweep has removed the entry yet.
    pub fn lookup(&self, account_number: &str) -> Option<VirtualAccount> {
        let now = Utc::now();
        self.accounts
            .get(account_number)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.clone())
    }

    /// Number of entries physically present, expired or not.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Remove expired entries; returns how many were reclaimed.
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.accounts.len();
        self.accounts.retain(|_, account| !account.is_expired(now));
        let removed = before - self.accounts.len();
        if removed > 0 {
            tracing::debug!(removed, "Swept expired virtual accounts");
        }
        removed
    }

    /// Interval between background sweeps.
    pub fn sweep_interval(&self) -> tokio::time::Duration {
        tokio::time::Duration::from_secs(self.config.sweep_interval_secs.max(1))
    }

    /// Insert an already-built record. Test hook for expiry scenarios.
    #[doc(hidden)]
    pub fn insert_raw(&self, account: VirtualAccount) {
        self.accounts
            .insert(account.account_number.clone(), account);
    }
}
