// src/api/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong during one probe run
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The sample image does not exist
    #[error("sample image not found at {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The sample image exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request could not complete, or the server answered with a non-2xx status
    #[error("{reason}")]
    Transport {
        reason: String,
        body: Option<String>,
    },

    /// Anything else, e.g. a 2xx response that is not JSON
    #[error("{0}")]
    Unexpected(String),
}

impl ProbeError {
    /// Body returned by the server alongside a failed request, if any
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ProbeError::Transport { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        let reason = describe_chain(&e);
        if e.is_builder() {
            return ProbeError::Unexpected(format!("invalid request: {}", reason));
        }
        let reason = if e.is_connect() {
            format!("connection error: {}", reason)
        } else if e.is_timeout() {
            format!("request timed out: {}", reason)
        } else {
            reason
        };
        ProbeError::Transport { reason, body: None }
    }
}

// reqwest's Display stops at the outermost error; the OS reason lives further down
fn describe_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = inner.source();
    }
    parts.join(": ")
}
