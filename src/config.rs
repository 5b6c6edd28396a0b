// src/config.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/vision";
pub const DEFAULT_SAMPLE_IMAGE: &str = "sample.jpg";

pub const API_URL_ENV: &str = "VISION_API_URL";
pub const SAMPLE_IMAGE_ENV: &str = "VISION_SAMPLE_IMAGE";

/// Settings for a single probe run
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    pub api_url: String,
    pub image_path: PathBuf,
    pub timeout: Option<Duration>,
    pub detect_mime: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            image_path: PathBuf::from(DEFAULT_SAMPLE_IMAGE),
            timeout: None,
            detect_mime: false,
        }
    }
}

impl ProbeConfig {
    /// Flag, then environment, then the built-in default
    pub fn resolve(url_arg: Option<String>, image_arg: Option<PathBuf>) -> Self {
        let api_url = get_api_url(url_arg, std::env::var(API_URL_ENV).ok());
        let image_path = get_image_path(image_arg, std::env::var(SAMPLE_IMAGE_ENV).ok());

        Self {
            api_url,
            image_path: absolutize(&image_path),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_detect_mime(mut self, detect_mime: bool) -> Self {
        self.detect_mime = detect_mime;
        self
    }
}

fn get_api_url(url_arg: Option<String>, from_env: Option<String>) -> String {
    let non_blank = |u: &String| !u.trim().is_empty();
    url_arg
        .filter(non_blank)
        .or_else(|| from_env.filter(non_blank))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

fn get_image_path(image_arg: Option<PathBuf>, from_env: Option<String>) -> PathBuf {
    image_arg
        .or_else(|| from_env.filter(|p| !p.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_IMAGE))
}

/// Anchor relative paths at the working directory so messages show the full path
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
