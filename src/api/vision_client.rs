// src/api/vision_client.rs
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;

use super::connector::VisionConnector;
use super::error::ProbeError;
use super::payload::RequestPayload;

//Blocking HTTP client for a `/api/vision` style endpoint
pub struct VisionClient {
    url: String,
    client: Client,
}

impl VisionClient {
    /// Build a client for `url`. Without a timeout, reqwest's own default applies.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, ProbeError> {
        Url::parse(url)
            .map_err(|e| ProbeError::Unexpected(format!("invalid endpoint URL '{}': {}", url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// POST the payload once and parse a successful response as JSON
    pub fn send(&self, payload: &RequestPayload) -> Result<Value, ProbeError> {
        let body = payload
            .to_json()
            .map_err(|e| ProbeError::Unexpected(format!("failed to serialize payload: {}", e)))?;

        info!("POST {} ({} byte payload)", self.url, body.len());

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let reason = match status.canonical_reason() {
                Some(text) => format!("HTTP {} {}", status.as_u16(), text),
                None => format!("HTTP {}", status.as_u16()),
            };
            //the body usually explains what the server rejected
            let body = match response.text() {
                Ok(text) if !text.trim().is_empty() => Some(text),
                Ok(_) => None,
                Err(e) => {
                    warn!("Could not read error response body: {}", e);
                    None
                }
            };
            return Err(ProbeError::Transport { reason, body });
        }

        let text = response.text()?;
        serde_json::from_str(&text)
            .map_err(|e| ProbeError::Unexpected(format!("invalid JSON in response: {}", e)))
    }
}

impl VisionConnector for VisionClient {
    fn analyze(&mut self, payload: &RequestPayload) -> Result<Value, ProbeError> {
        self.send(payload)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
