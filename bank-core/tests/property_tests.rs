//! Property-based tests for ledger invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Balances never go negative, whatever sequence of transfers runs
//! - History grows exactly with successful transfers
//! - PIN hashing is deterministic and round-trips through verify
//! - `recent(limit)` is bounded and order-preserving

use bank_core::history::TransactionHistory;
use bank_core::pin::PinHasher;
use bank_core::transfer::TransferRequest;
use bank_core::types::{TransactionRecord, TransactionStatus};
use bank_core::{BankService, Config, Error};
use proptest::prelude::*;

/// Strategy for transfer amounts around the fixture balance, so runs mix
/// successes and shortfalls.
fn amount_strategy() -> impl Strategy<Value = i64> {
    1i64..30_000
}

/// Strategy for numeric PINs.
fn pin_strategy() -> impl Strategy<Value = String> {
    "[0-9]{4,6}"
}

fn transfer_request(amount: i64, pin: &str) -> TransferRequest {
    TransferRequest {
        from_bank: "KB".to_string(),
        from_account: "123456789012".to_string(),
        account_holder: "홍길동".to_string(),
        amount,
        pin: pin.to_string(),
        card_id: "card1".to_string(),
    }
}

fn history_record(id: usize) -> TransactionRecord {
    TransactionRecord {
        transaction_id: format!("TXN_{}", id),
        from_bank: "KB".to_string(),
        from_account: "123456789012".to_string(),
        amount: 1_000,
        timestamp: chrono::Utc::now(),
        card_id: "card1".to_string(),
        status: TransactionStatus::Success,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: no sequence of transfers drives the balance negative, and
    /// history length equals the number of successes.
    #[test]
    fn prop_balance_never_negative(amounts in prop::collection::vec(amount_strategy(), 1..20)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let service = BankService::new(Config::for_tests());
            let mut successes = 0usize;

            for amount in amounts {
                match service.process_transfer(transfer_request(amount, "1234")).await {
                    Ok(receipt) => {
                        successes += 1;
                        prop_assert!(receipt.new_balance >= 0);
                    }
                    Err(Error::InsufficientFunds { balance, requested }) => {
                        prop_assert!(balance < requested);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {}", other),
                }

                let balance = service.balance("KB", "123456789012", "1234").await.unwrap();
                prop_assert!(balance >= 0);
            }

            let history = service.transfer_history("u1", Some(1000)).unwrap();
            prop_assert_eq!(history.len(), successes);
            Ok(())
        })?;
    }

    /// Property: a wrong PIN never changes the balance or the history.
    #[test]
    fn prop_wrong_pin_has_no_effect(amount in amount_strategy(), pin in pin_strategy()) {
        prop_assume!(pin != "1234");
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let service = BankService::new(Config::for_tests());

            let result = service.process_transfer(transfer_request(amount, &pin)).await;
            prop_assert!(matches!(result, Err(Error::InvalidPin)));

            let balance = service.balance("KB", "123456789012", "1234").await.unwrap();
            prop_assert_eq!(balance, 50_000);
            prop_assert!(service.transfer_history("u1", None).unwrap().is_empty());
            Ok(())
        })?;
    }

    /// Property: hashing is deterministic and verify round-trips.
    #[test]
    fn prop_hash_deterministic(pin in pin_strategy()) {
        let hasher = PinHasher::new();
        let credential = hasher.hash(&pin);
        prop_assert_eq!(hasher.hash(&pin), credential.clone());
        prop_assert!(hasher.verify(&pin, &credential));
    }

    /// Property: `recent(limit)` returns at most `limit` records, in append
    /// order, and everything when the limit exceeds the count.
    #[test]
    fn prop_recent_window_bounds(count in 0usize..50, limit in 0usize..80) {
        let history = TransactionHistory::new();
        for i in 0..count {
            history.append(history_record(i));
        }

        let window = history.recent(limit);
        prop_assert!(window.len() <= limit);
        prop_assert_eq!(window.len(), limit.min(count));

        // Append order within the window
        for pair in window.windows(2) {
            let left: usize = pair[0].transaction_id["TXN_".len()..].parse().unwrap();
            let right: usize = pair[1].transaction_id["TXN_".len()..].parse().unwrap();
            prop_assert_eq!(left + 1, right);
        }

        // The window is the tail of the log
        if let Some(last) = window.last() {
            let expected = format!("TXN_{}", count - 1);
            prop_assert_eq!(last.transaction_id.as_str(), expected.as_str());
        }
    }

    /// Property: non-positive TTLs are always rejected with no state change.
    #[test]
    fn prop_bad_ttl_rejected(ttl in -100i64..=0) {
        let service = BankService::new(Config::for_tests());
        let result = service.create_virtual_account("u1", 5_000, "T-money", "c1", Some(ttl));
        prop_assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_scenario_three_transfers() {
        let service = BankService::new(Config::for_tests());

        // First transfer: 50000 -> 30000
        let receipt = service
            .process_transfer(transfer_request(20_000, "1234"))
            .await
            .unwrap();
        assert_eq!(receipt.new_balance, 30_000);

        // Second identical transfer: 30000 -> 10000
        let receipt = service
            .process_transfer(transfer_request(20_000, "1234"))
            .await
            .unwrap();
        assert_eq!(receipt.new_balance, 10_000);

        // Third cannot fit; balance stays at 10000
        let err = service
            .process_transfer(transfer_request(20_000, "1234"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));
        assert_eq!(
            service.balance("KB", "123456789012", "1234").await.unwrap(),
            10_000
        );
        assert_eq!(service.transfer_history("u1", None).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_joint_overdraw() {
        let service = std::sync::Arc::new(BankService::new(Config::for_tests()));

        let a = {
            let s = std::sync::Arc::clone(&service);
            tokio::spawn(async move { s.process_transfer(transfer_request(30_000, "1234")).await })
        };
        let b = {
            let s = std::sync::Arc::clone(&service);
            tokio::spawn(async move { s.process_transfer(transfer_request(30_000, "1234")).await })
        };

        let outcomes = [a.await.unwrap(), b.await.unwrap()];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|r| matches!(r, Err(Error::InsufficientFunds { .. })))
                .count(),
            1
        );
        assert_eq!(
            service.balance("KB", "123456789012", "1234").await.unwrap(),
            20_000
        );
    }
}
