//! Method dispatch
//!
//! One handler per channel method, mirroring the method table both mobile
//! clients call. Each handler extracts its arguments, delegates to the bank
//! service, and serializes the result; failures are mapped to the method's
//! boundary error exactly once, here at the edge.

use crate::args::Args;
use crate::error::{map_error, ErrorBody};
use crate::provider::{Provider, ProviderGateway};
use bank_core::transfer::TransferRequest;
use bank_core::types::format_timestamp;
use bank_core::{BankService, Result};
use serde_json::{json, Value};
use std::sync::Arc;

/// Dispatches channel calls onto a [`BankService`].
#[derive(Debug)]
pub struct Dispatcher {
    service: Arc<BankService>,
    providers: ProviderGateway,
}

impl Dispatcher {
    /// Build a dispatcher over a service instance.
    pub fn new(service: Arc<BankService>) -> Self {
        let providers = ProviderGateway::new(service.idgen(), service.config().latency.clone());
        Self { service, providers }
    }

    /// Handle one channel call.
    pub async fn handle(&self, method: &str, arguments: &Value) -> std::result::Result<Value, ErrorBody> {
        let result = match method {
            "createVirtualAccount" => self.create_virtual_account(arguments),
            "processTransfer" => self.process_transfer(arguments).await,
            "validateAccount" => self.validate_account(arguments).await,
            "getUserAccounts" => self.get_user_accounts(arguments),
            "getBalance" => self.get_balance(arguments).await,
            "getTransferHistory" => self.get_transfer_history(arguments),
            "processTossTransfer" => self.provider_transfer(Provider::Toss, arguments).await,
            "processKakaoPayTransfer" => self.provider_transfer(Provider::KakaoPay, arguments).await,
            "processNaverPayTransfer" => self.provider_transfer(Provider::NaverPay, arguments).await,
            _ => return Err(ErrorBody::method_not_found(method)),
        };

        result.map_err(|err| map_error(err, method_error_code(method)))
    }

    fn create_virtual_account(&self, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let account = self.service.create_virtual_account(
            args.string("userId")?,
            args.integer("amount")?,
            args.string("cardType")?,
            args.string("cardNumber")?,
            args.integer_opt("expireMinutes")?,
        )?;

        Ok(json!({
            "accountNumber": account.account_number,
            "bankName": account.bank_name,
            "bankCode": account.bank_code,
            "amount": account.amount,
            "expireAt": format_timestamp(account.expire_at),
            "depositorName": account.depositor_name,
        }))
    }

    async fn process_transfer(&self, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let request = TransferRequest {
            from_bank: args.string("fromBank")?.to_string(),
            from_account: args.string("fromAccount")?.to_string(),
            account_holder: args.string("accountHolder")?.to_string(),
            amount: args.integer("amount")?,
            pin: args.string("pin")?.to_string(),
            card_id: args.string("cardId")?.to_string(),
        };

        let receipt = self.service.process_transfer(request).await?;
        Ok(json!({
            "success": true,
            "transactionId": receipt.transaction_id,
            "amount": receipt.amount,
            "completedAt": format_timestamp(receipt.completed_at),
            "newBalance": receipt.new_balance,
        }))
    }

    async fn validate_account(&self, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let valid = self
            .service
            .validate_account(
                args.string("bank")?,
                args.string("account")?,
                args.string("holder")?,
            )
            .await?;
        Ok(Value::Bool(valid))
    }

    fn get_user_accounts(&self, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let accounts = self.service.user_accounts(args.string("userId")?)?;

        let rows: Vec<Value> = accounts
            .iter()
            .map(|summary| {
                json!({
                    "bank": &summary.bank,
                    "bankName": &summary.bank_name,
                    "accountNumber": &summary.account_number,
                    "accountHolder": &summary.account_holder,
                    "balance": summary.balance,
                    "isDefault": summary.is_default,
                })
            })
            .collect();
        Ok(Value::Array(rows))
    }

    async fn get_balance(&self, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let balance = self
            .service
            .balance(
                args.string("bank")?,
                args.string("account")?,
                args.string("pin")?,
            )
            .await?;
        Ok(json!(balance))
    }

    fn get_transfer_history(&self, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let user_id = args.string("userId")?;
        // Negative limits clamp to zero: an empty window, not an error.
        let limit = args
            .integer_opt("limit")?
            .map(|limit| limit.max(0) as usize);

        let records = self.service.transfer_history(user_id, limit)?;
        let history = &self.service.config().history;

        let rows: Vec<Value> = records
            .iter()
            .map(|record| {
                json!({
                    "transactionId": &record.transaction_id,
                    "amount": record.amount,
                    "fromAccount": &record.from_account,
                    "toAccount": &history.counterparty,
                    "transferredAt": format_timestamp(record.timestamp),
                    "status": record.status.as_str(),
                    "description": &history.description,
                })
            })
            .collect();
        Ok(Value::Array(rows))
    }

    async fn provider_transfer(&self, provider: Provider, arguments: &Value) -> Result<Value> {
        let args = Args::from_value(arguments)?;
        let receipt = self
            .providers
            .transfer(provider, args.integer("amount")?, args.string("cardId")?)
            .await?;

        Ok(json!({
            "success": true,
            "transactionId": receipt.transaction_id,
            "amount": receipt.amount,
        }))
    }
}

/// Wrapper error code for failures the taxonomy does not name itself.
fn method_error_code(method: &str) -> &'static str {
    match method {
        "createVirtualAccount" => "CREATE_VIRTUAL_ACCOUNT_ERROR",
        "processTransfer" => "TRANSFER_ERROR",
        "validateAccount" => "VALIDATION_ERROR",
        "getUserAccounts" => "GET_ACCOUNTS_ERROR",
        "getBalance" => "BALANCE_ERROR",
        "getTransferHistory" => "HISTORY_ERROR",
        "processTossTransfer" => Provider::Toss.error_code(),
        "processKakaoPayTransfer" => Provider::KakaoPay.error_code(),
        "processNaverPayTransfer" => Provider::NaverPay.error_code(),
        _ => "INTERNAL_ERROR",
    }
}
