//! Identifier generation
//!
//! Two id kinds, both human-traceable:
//! - virtual account numbers: 14 random decimal digits
//! - transaction ids: `TXN_<unix-millis>_<seq><rand>` where `<seq>` is a
//!   process-wide counter, making ids unique for the process lifetime

use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Length of a generated virtual account number.
pub const VIRTUAL_ACCOUNT_NUMBER_LEN: usize = 14;

/// Prefix carried by every transaction id.
pub const TRANSACTION_ID_PREFIX: &str = "TXN_";

/// Generator for virtual account numbers and transaction ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    sequence: AtomicU64,
}

impl IdGenerator {
    /// Create a generator with a fresh sequence.
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }

    /// Produce a 14-digit numeric virtual account number.
    ///
    /// Randomness is the only uniqueness source here; the registry retries
    /// on the rare collision at insert time.
    pub fn next_virtual_account_number(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..VIRTUAL_ACCOUNT_NUMBER_LEN)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Produce a transaction id: prefix, millisecond timestamp, sequence,
    /// random suffix.
    ///
    /// The sequence guarantees process-wide uniqueness even when two ids
    /// land on the same millisecond.
    pub fn next_transaction_id(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
        format!("{}{}_{:06}{:04}", TRANSACTION_ID_PREFIX, millis, seq, suffix)
    }
}
