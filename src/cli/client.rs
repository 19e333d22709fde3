use anyhow::{anyhow, bail, Context};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::rpc::RpcError;

/// Minimal JSON-RPC client for the `/jsonrpc` endpoint
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("invalid server URL '{}'", base_url))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/jsonrpc", base_url.trim_end_matches('/')),
            token,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call `method` with named params and decode the result
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> anyhow::Result<T> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("no token: pass --token or set KANBAN_API_TOKEN"))?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        tracing::debug!("POST {} {}", self.endpoint, method);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.endpoint))?;

        let status = response.status();
        let body: Value = response.json().await.context("server returned a non-JSON body")?;

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            bail!("{} ({})", message, status);
        }

        decode_response(body)
    }
}

fn decode_response<T: DeserializeOwned>(mut body: Value) -> anyhow::Result<T> {
    if let Some(error) = body.get_mut("error").map(Value::take) {
        let error: RpcError = serde_json::from_value(error).context("malformed error object")?;
        return Err(anyhow!(error));
    }

    let result = body
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| anyhow!("response has neither result nor error"))?;

    serde_json::from_value(result).context("unexpected result type")
}
