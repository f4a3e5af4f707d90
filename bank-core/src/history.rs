//! Append-only transaction history

use crate::types::TransactionRecord;
use parking_lot::RwLock;

/// Time-ordered record of completed transfers.
///
/// Records are appended by the transfer processor and never mutated or
/// deleted while the process lives.
#[derive(Debug, Default)]
pub struct TransactionHistory {
    records: RwLock<Vec<TransactionRecord>>,
}

impl TransactionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Append a record. Always succeeds.
    pub fn append(&self, record: TransactionRecord) {
        self.records.write().push(record);
    }

    /// The last `limit` records, oldest-first within that window.
    ///
    /// `limit == 0` yields nothing; a limit past the stored count yields
    /// everything.
    pub fn recent(&self, limit: usize) -> Vec<TransactionRecord> {
        let records = self.records.read();
        let start = records.len().saturating_sub(limit);
        records[start..].to_vec()
    }

    /// Number of records stored.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether no records have been stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
