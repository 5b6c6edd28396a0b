// src/api/connector.rs
use serde_json::Value;

use super::error::ProbeError;
use super::payload::RequestPayload;

/// Trait defining the interface to a vision endpoint
pub trait VisionConnector {
    /// Submit one payload and return the parsed JSON response
    fn analyze(&mut self, payload: &RequestPayload) -> Result<Value, ProbeError>;

    /// Where the payload is going, for log and console output
    fn endpoint(&self) -> &str;
}
