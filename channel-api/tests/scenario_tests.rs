//! End-to-end scenarios through the channel boundary
//!
//! These drive the dispatcher exactly the way a mobile client drives the
//! platform channel: method name plus argument map, JSON in and out.

use bank_core::{BankService, Config};
use channel_api::Dispatcher;
use serde_json::{json, Value};
use std::sync::Arc;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(BankService::new(Config::for_tests())))
}

fn transfer_args(amount: i64) -> Value {
    json!({
        "fromBank": "KB",
        "fromAccount": "123456789012",
        "accountHolder": "홍길동",
        "amount": amount,
        "pin": "1234",
        "cardId": "card1",
    })
}

#[tokio::test]
async fn test_topup_transfer_scenario() {
    let d = dispatcher();

    // First transfer: 50000 -> 30000
    let result = d.handle("processTransfer", &transfer_args(20_000)).await.unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(result["newBalance"], 30_000);
    assert!(result["transactionId"].as_str().unwrap().starts_with("TXN_"));

    // Second identical transfer: 30000 -> 10000
    let result = d.handle("processTransfer", &transfer_args(20_000)).await.unwrap();
    assert_eq!(result["newBalance"], 10_000);

    // Third cannot fit
    let err = d.handle("processTransfer", &transfer_args(20_000)).await.unwrap_err();
    assert_eq!(err.code, "INSUFFICIENT_BALANCE");
    assert_eq!(err.message, "잔액이 부족합니다");

    // Balance unchanged by the failure; two history rows recorded
    let balance = d
        .handle(
            "getBalance",
            &json!({"bank": "KB", "account": "123456789012", "pin": "1234"}),
        )
        .await
        .unwrap();
    assert_eq!(balance, json!(10_000));

    let history = d
        .handle("getTransferHistory", &json!({"userId": "u1"}))
        .await
        .unwrap();
    let rows = history.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["status"], "SUCCESS");
    assert_eq!(rows[0]["fromAccount"], "123456789012");
    assert_eq!(rows[0]["toAccount"], "FAREPAY_CHARGE");
    assert_eq!(rows[0]["description"], "교통카드 충전");
}

#[tokio::test]
async fn test_transfer_failures_leave_no_trace() {
    let d = dispatcher();

    // Unknown account
    let mut args = transfer_args(1_000);
    args["fromAccount"] = json!("000000000000");
    let err = d.handle("processTransfer", &args).await.unwrap_err();
    assert_eq!(err.code, "INVALID_ACCOUNT");
    assert_eq!(err.message, "계좌를 찾을 수 없습니다");

    // Wrong PIN
    let mut args = transfer_args(1_000);
    args["pin"] = json!("0000");
    let err = d.handle("processTransfer", &args).await.unwrap_err();
    assert_eq!(err.code, "INVALID_PIN");

    // Non-positive amount
    let err = d
        .handle("processTransfer", &transfer_args(0))
        .await
        .unwrap_err();
    assert_eq!(err.code, "TRANSFER_ERROR");

    // Nothing recorded, nothing debited
    let history = d
        .handle("getTransferHistory", &json!({"userId": "u1"}))
        .await
        .unwrap();
    assert!(history.as_array().unwrap().is_empty());

    let accounts = d
        .handle("getUserAccounts", &json!({"userId": "u1"}))
        .await
        .unwrap();
    let kb = accounts
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["bank"] == "KB")
        .unwrap()
        .clone();
    assert_eq!(kb["balance"], 50_000);
    assert_eq!(kb["isDefault"], true);
}

#[tokio::test]
async fn test_concurrent_transfers_one_winner() {
    let service = Arc::new(BankService::new(Config::for_tests()));
    let d = Arc::new(Dispatcher::new(Arc::clone(&service)));

    // Each fits alone; together they overdraw the 50000 balance.
    let a = {
        let d = Arc::clone(&d);
        tokio::spawn(async move { d.handle("processTransfer", &transfer_args(30_000)).await })
    };
    let b = {
        let d = Arc::clone(&d);
        tokio::spawn(async move { d.handle("processTransfer", &transfer_args(30_000)).await })
    };

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| r
                .as_ref()
                .is_err_and(|e| e.code == "INSUFFICIENT_BALANCE"))
            .count(),
        1
    );

    let balance = d
        .handle(
            "getBalance",
            &json!({"bank": "KB", "account": "123456789012", "pin": "1234"}),
        )
        .await
        .unwrap();
    assert_eq!(balance, json!(20_000));
}

#[tokio::test]
async fn test_virtual_account_lifecycle() {
    let service = Arc::new(BankService::new(Config::for_tests()));
    let d = Dispatcher::new(Arc::clone(&service));

    let result = d
        .handle(
            "createVirtualAccount",
            &json!({
                "userId": "u1",
                "amount": 5000,
                "cardType": "T-money",
                "cardNumber": "c1",
                "expireMinutes": 1
            }),
        )
        .await
        .unwrap();

    let number = result["accountNumber"].as_str().unwrap().to_string();
    assert_eq!(number.len(), 14);
    assert_eq!(result["depositorName"], "FAREPAY_USER");

    // Live before expiry
    let found = service.lookup_virtual_account(&number).unwrap();
    assert_eq!(found.amount, 5000);
    assert_eq!(found.user_id, "u1");

    // ISO-8601 UTC expiry, parseable and about a minute out
    let expire_at = chrono::NaiveDateTime::parse_from_str(
        result["expireAt"].as_str().unwrap(),
        "%Y-%m-%dT%H:%M:%S",
    )
    .unwrap()
    .and_utc();
    let ttl = expire_at - chrono::Utc::now();
    assert!(ttl <= chrono::Duration::minutes(1));
    assert!(ttl > chrono::Duration::seconds(50));
}

#[tokio::test]
async fn test_history_limit_and_defaults() {
    let d = dispatcher();

    for _ in 0..25 {
        d.handle("processTransfer", &transfer_args(1_000)).await.unwrap();
    }

    // Default window is 20
    let history = d
        .handle("getTransferHistory", &json!({"userId": "u1"}))
        .await
        .unwrap();
    assert_eq!(history.as_array().unwrap().len(), 20);

    // Explicit limit
    let history = d
        .handle("getTransferHistory", &json!({"userId": "u1", "limit": 5}))
        .await
        .unwrap();
    assert_eq!(history.as_array().unwrap().len(), 5);

    // Negative limit clamps to an empty window
    let history = d
        .handle("getTransferHistory", &json!({"userId": "u1", "limit": -3}))
        .await
        .unwrap();
    assert!(history.as_array().unwrap().is_empty());
}
