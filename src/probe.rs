// src/probe.rs
use log::{error, info};
use serde_json::Value;
use std::io::{self, Write};

use crate::api::connector::VisionConnector;
use crate::api::error::ProbeError;
use crate::api::payload::{build_payload, build_payload_with_mime, RequestPayload};
use crate::api::vision_client::VisionClient;
use crate::config::ProbeConfig;
use crate::sample::loader;

/// Result of one probe run. Failures are values here, not errors.
#[derive(Debug)]
pub enum ProbeOutcome {
    Success(Value),
    Failed(ProbeError),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    pub fn response(&self) -> Option<&Value> {
        match self {
            ProbeOutcome::Success(value) => Some(value),
            ProbeOutcome::Failed(_) => None,
        }
    }
}

/// Load the configured sample image and wrap it as a request payload
pub fn load_payload(config: &ProbeConfig) -> Result<RequestPayload, ProbeError> {
    if config.detect_mime {
        let bytes = loader::read_image(&config.image_path)?;
        let mime = loader::detect_mime(&bytes);
        info!("Detected {} for {}", mime, config.image_path.display());
        Ok(build_payload_with_mime(mime, &loader::encode_bytes(&bytes)))
    } else {
        let encoded = loader::encode(&config.image_path)?;
        Ok(build_payload(&encoded))
    }
}

/// Build an HTTP client for the configured endpoint and run the probe with it.
/// A client that cannot be built is reported like any other failure.
pub fn probe_endpoint(config: &ProbeConfig, out: &mut dyn Write) -> io::Result<ProbeOutcome> {
    match VisionClient::new(&config.api_url, config.timeout) {
        Ok(mut client) => run_probe(&mut client, config, out),
        Err(e) => {
            error!("Could not set up client for {}: {}", config.api_url, e);
            render_failure(&e, out)?;
            Ok(ProbeOutcome::Failed(e))
        }
    }
}

/// Encode, send and report. Only a failing `out` surfaces as an error.
pub fn run_probe(
    connector: &mut dyn VisionConnector,
    config: &ProbeConfig,
    out: &mut dyn Write,
) -> io::Result<ProbeOutcome> {
    info!("Probing {} with {}", connector.endpoint(), config.image_path.display());

    let result = load_payload(config).and_then(|payload| connector.analyze(&payload));

    match result {
        Ok(value) => {
            render_success(&value, out)?;
            Ok(ProbeOutcome::Success(value))
        }
        Err(e) => {
            error!("Vision probe failed: {}", e);
            render_failure(&e, out)?;
            Ok(ProbeOutcome::Failed(e))
        }
    }
}

pub fn render_success(value: &Value, out: &mut dyn Write) -> io::Result<()> {
    let pretty = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    writeln!(out, "✓ API request successful")?;
    writeln!(out)?;
    writeln!(out, "Response content:")?;
    writeln!(out, "{}", pretty)
}

pub fn render_failure(err: &ProbeError, out: &mut dyn Write) -> io::Result<()> {
    match err {
        ProbeError::FileNotFound { .. } => writeln!(out, "✗ Error: {}", err),
        ProbeError::Transport { .. } => {
            writeln!(out, "✗ API request failed: {}", err)?;
            if let Some(body) = err.response_body() {
                writeln!(out, "Response: {}", body)?;
            }
            Ok(())
        }
        ProbeError::Io { .. } | ProbeError::Unexpected(_) => {
            writeln!(out, "✗ Error occurred: {}", err)
        }
    }
}
