// src/sample/loader.rs
use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use log::info;
use std::io::ErrorKind;
use std::path::Path;

use crate::api::error::ProbeError;

pub const DEFAULT_MIME: &str = "image/jpeg";

/// Read the whole file into memory. The handle is closed before this returns.
pub fn read_image(path: &Path) -> Result<Vec<u8>, ProbeError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ProbeError::FileNotFound { path: path.to_path_buf() },
        _ => ProbeError::Io { path: path.to_path_buf(), source: e },
    })
}

/// Read an image and return its contents as standard base64
pub fn encode(path: &Path) -> Result<String, ProbeError> {
    let bytes = read_image(path)?;
    info!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(encode_bytes(&bytes))
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Guess the MIME type from the file's magic bytes. Only the types the vision
/// route accepts (jpeg, png, gif) are reported; anything else is sent as JPEG.
pub fn detect_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::Gif) => "image/gif",
        _ => DEFAULT_MIME,
    }
}
