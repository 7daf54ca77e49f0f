// Copyright (c) 2026 voltctl contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP client for the controller northbound API.
//!
//! The rest of voltctl never sees the transport: every call produces plain
//! `serde_json::Value` records that flow straight into the filter, order,
//! and format engines.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::debug;

pub struct ControllerClient {
    base: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl ControllerClient {
    pub fn new(server: &str, timeout: Duration) -> Result<ControllerClient> {
        let base = server.trim_end_matches('/').to_string();
        // The per-request timeout is applied to unary calls only; the event
        // stream stays open indefinitely and manages its own idle timeout.
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ControllerClient {
            base,
            timeout,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// GET a collection endpoint. Accepts either a bare JSON array or the
    /// protobuf-gateway convention of `{"items": [...]}`.
    pub async fn list(&self, path: &str) -> Result<Value> {
        let body = self.get(path).await?;
        match body {
            Value::Array(_) => Ok(body),
            Value::Object(mut object) => match object.remove("items") {
                Some(items @ Value::Array(_)) => Ok(items),
                _ => Err(anyhow!("response from {} is not a collection", path)),
            },
            _ => Err(anyhow!("response from {} is not a collection", path)),
        }
    }

    /// GET a single resource as a record.
    pub async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("controller returned {} for {}", status, url));
        }
        response
            .json()
            .await
            .with_context(|| format!("Failed to decode response from {}", url))
    }

    /// POST an operation endpoint (enable, disable, reboot, ...).
    pub async fn post(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("controller returned {} for {}", status, url));
        }
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        let response = self
            .http
            .delete(&url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("controller returned {} for {}", status, url));
        }
        Ok(())
    }

    /// Open the event stream (newline-delimited JSON). No request timeout:
    /// the consumer decides when an idle stream is dead.
    pub async fn events(&self, path: &str) -> Result<EventStream> {
        let url = self.url(path);
        debug!(%url, "GET (stream)");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("controller returned {} for {}", status, url));
        }
        Ok(EventStream {
            response,
            buffer: Vec::new(),
        })
    }
}

/// Incrementally decodes newline-delimited JSON records from a streaming
/// response body.
pub struct EventStream {
    response: reqwest::Response,
    buffer: Vec<u8>,
}

impl EventStream {
    /// Next decoded event, or None when the stream ends. Blank lines are
    /// skipped; a malformed line is an error for that event only.
    pub async fn next_event(&mut self) -> Option<Result<Value>> {
        loop {
            if let Some(position) = self.buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = self.buffer.drain(..=position).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                return Some(
                    serde_json::from_str(line)
                        .with_context(|| format!("Failed to decode event: {}", line)),
                );
            }

            match self.response.chunk().await {
                Ok(Some(chunk)) => self.buffer.extend_from_slice(&chunk),
                Ok(None) => {
                    // Stream closed; flush any unterminated final line.
                    if self.buffer.iter().all(|b| b.is_ascii_whitespace()) {
                        return None;
                    }
                    let line = String::from_utf8_lossy(&self.buffer).trim().to_string();
                    self.buffer.clear();
                    return Some(
                        serde_json::from_str(&line)
                            .with_context(|| format!("Failed to decode event: {}", line)),
                    );
                }
                Err(e) => return Some(Err(e).context("Event stream read failed")),
            }
        }
    }
}
