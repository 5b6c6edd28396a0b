// src/api/payload.rs
use serde::{Deserialize, Serialize};

use crate::sample::loader::DEFAULT_MIME;

/// Body of a vision request: a single data URI under `image`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub image: String,
}

impl RequestPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn data_uri(mime: &str, base64: &str) -> String {
    format!("data:{};base64,{}", mime, base64)
}

/// Wrap already-encoded image data as a JPEG data URI
pub fn build_payload(base64: &str) -> RequestPayload {
    build_payload_with_mime(DEFAULT_MIME, base64)
}

pub fn build_payload_with_mime(mime: &str, base64: &str) -> RequestPayload {
    RequestPayload { image: data_uri(mime, base64) }
}
