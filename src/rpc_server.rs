//! Pafari about-handler server: JSON-RPC over stdin/stdout for the browser shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"about.request", "params":{"path":"overview","page_id":7}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Page requests are rendered on their own tasks, so their responses may
//! overtake earlier ones. Everything else is answered in order.

use std::sync::Arc;
use std::time::Instant;

use pafari::app::{App, AppOptions};
use pafari::rpc_handler::handle_method;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MAX_REQUESTS_PER_SECOND: u32 = 200;

/// Simple rate limiter: max requests per one-second window.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn reply(id: Value, result: Result<Value, String>) -> Value {
    match result {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

/// Serializes every outgoing message onto stdout, one per line.
async fn write_messages(mut messages: mpsc::UnboundedReceiver<Value>) {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = messages.recv().await {
        let line = format!("{}\n", message);
        if let Err(e) = stdout.write_all(line.as_bytes()).await {
            warn!("stdout closed: {}", e);
            break;
        }
        if let Err(e) = stdout.flush().await {
            warn!("failed to flush stdout: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pafari=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = Arc::new(App::new(AppOptions::from_env())?);

    let (outgoing, messages) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_messages(messages));

    let ready = json!({
        "event": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "user_agent": app.user_agent().as_str(),
    });
    let _ = outgoing.send(ready);
    info!("Pafari about handler v{} ready", env!("CARGO_PKG_VERSION"));

    let mut rate_limiter = RateLimiter::new(MAX_REQUESTS_PER_SECOND);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let _ = outgoing.send(json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let _ = outgoing.send(reply(id, Err("rate limit exceeded".to_string())));
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
        let params = req.get("params").cloned().unwrap_or(json!({}));

        if method == "about.request" {
            let app = Arc::clone(&app);
            let outgoing = outgoing.clone();
            tokio::spawn(async move {
                let result = handle_method(&app, &method, &params).await;
                let _ = outgoing.send(reply(id, result));
            });
        } else {
            let result = handle_method(&app, &method, &params).await;
            let _ = outgoing.send(reply(id, result));
        }
    }

    info!("stdin closed, shutting down");
    drop(outgoing);
    writer.await?;
    Ok(())
}
