//! Bank channel server binary
//!
//! Speaks the channel contract over stdin/stdout: one JSON call per line in
//! (`{"method": "...", "args": {...}}`), one JSON response per line out
//! (`{"ok": ...}` or `{"error": {"code": ..., "message": ...}}`).

use bank_core::{BankService, Config};
use channel_api::Dispatcher;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Deserialize)]
struct CallRequest {
    method: String,
    #[serde(default)]
    args: Value,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting FarePay bank channel server");

    // Load configuration
    let config = Config::from_env()?;
    let service = Arc::new(BankService::new(config));
    let sweeper = service.spawn_sweeper();
    let dispatcher = Dispatcher::new(Arc::clone(&service));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<CallRequest>(&line) {
            Ok(call) => match dispatcher.handle(&call.method, &call.args).await {
                Ok(result) => json!({ "ok": result }),
                Err(body) => json!({ "error": body }),
            },
            Err(err) => json!({
                "error": { "code": "MALFORMED_REQUEST", "message": err.to_string() }
            }),
        };

        stdout.write_all(response.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    sweeper.abort();
    tracing::info!("Shutting down bank channel server");
    Ok(())
}
