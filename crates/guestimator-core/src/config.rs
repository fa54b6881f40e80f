//! Configuration module
//!
//! Endpoint and validation settings for the upload form, read from the environment
//! (a `.env` file is honored).

use std::env;
use std::time::Duration;

use crate::constants::{ALLOWED_CONTENT_TYPES, DEFAULT_UPLOAD_URL, MAX_FILE_SIZE_MB};

/// Upload form configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// Full URL of the quoting endpoint.
    pub upload_url: String,
    pub max_file_size_mb: usize,
    pub allowed_content_types: Vec<String>,
    /// Require the bytes to match the declared MIME type.
    pub sniff_content: bool,
    /// Drop the selection when the preview cannot be decoded.
    pub reject_undecodable: bool,
    /// No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            max_file_size_mb: MAX_FILE_SIZE_MB,
            allowed_content_types: ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sniff_content: false,
            reject_undecodable: true,
            request_timeout_secs: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl FormConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = FormConfig::default();

        let upload_url = env::var("GUESTIMATOR_UPLOAD_URL")
            .or_else(|_| env::var("UPLOAD_URL"))
            .unwrap_or(defaults.upload_url);

        let max_file_size_mb = match env::var("GUESTIMATOR_MAX_FILE_SIZE_MB") {
            Ok(v) => v.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("Invalid GUESTIMATOR_MAX_FILE_SIZE_MB '{}': {}", v, e)
            })?,
            Err(_) => defaults.max_file_size_mb,
        };

        let allowed_content_types = env::var("GUESTIMATOR_ALLOWED_CONTENT_TYPES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_content_types);

        let sniff_content = env::var("GUESTIMATOR_SNIFF_CONTENT")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.sniff_content);

        let reject_undecodable = env::var("GUESTIMATOR_REJECT_UNDECODABLE")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.reject_undecodable);

        let request_timeout_secs = match env::var("GUESTIMATOR_REQUEST_TIMEOUT_SECS") {
            Ok(v) => Some(v.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("Invalid GUESTIMATOR_REQUEST_TIMEOUT_SECS '{}': {}", v, e)
            })?),
            Err(_) => None,
        };

        let config = FormConfig {
            upload_url,
            max_file_size_mb,
            allowed_content_types,
            sniff_content,
            reject_undecodable,
            request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.upload_url.starts_with("http://") || self.upload_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Upload URL must start with http:// or https:// (got '{}')",
                self.upload_url
            ));
        }
        if self.max_file_size_mb == 0 {
            return Err(anyhow::anyhow!("Maximum file size must be greater than zero"));
        }
        if self.allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!("At least one allowed content type is required"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("Request timeout must be greater than zero"));
        }
        Ok(())
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into();
        self
    }
}
