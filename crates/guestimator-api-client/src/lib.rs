//! HTTP client for the vehicle quote service.
//!
//! Sends one multipart POST per submission and maps every outcome onto
//! [`SubmitError`](guestimator_core::SubmitError). [`FormController`] drives the headless form
//! state through file selection, preview decoding and submission.

pub mod api;
pub mod controller;

use anyhow::{Context, Result};
use guestimator_core::FormConfig;
use reqwest::Client;

pub use controller::FormController;

/// HTTP client for the quoting endpoint.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    upload_url: String,
}

impl ApiClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(upload_url: String, timeout: Option<std::time::Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, upload_url })
    }

    pub fn from_config(config: &FormConfig) -> Result<Self> {
        Self::new(config.upload_url.clone(), config.request_timeout())
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

pub use guestimator_core::models::{FormDataEcho, QuoteResponse};
