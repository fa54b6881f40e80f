//! Quote submission against the upload endpoint.

use guestimator_core::constants::{
    FIELD_EMAIL, FIELD_NAME, FIELD_NUMBER, FIELD_VEHICLE_IMAGE, FIELD_VEHICLE_TYPE,
};
use guestimator_core::models::{QuoteResponse, ServerErrorBody};
use guestimator_core::{QuoteRequest, SubmitError};
use reqwest::multipart::{Form, Part};

use crate::ApiClient;

/// Classify a transport error. Connect failures, timeouts and requests that never got a
/// response count as "no response"; the rest is unexpected.
pub fn classify_transport_error(e: &reqwest::Error) -> SubmitError {
    if e.is_builder() {
        return SubmitError::Unknown(e.to_string());
    }
    if e.is_connect() || e.is_timeout() || e.is_request() {
        return SubmitError::Network(e.to_string());
    }
    SubmitError::Unknown(e.to_string())
}

/// Multipart payload: four text fields and the image part.
pub fn build_form(request: &QuoteRequest) -> Result<Form, SubmitError> {
    let image = Part::bytes(request.file.bytes.to_vec())
        .file_name(request.file.display_name.clone())
        .mime_str(&request.file.declared_mime_type)
        .map_err(|e| SubmitError::Unknown(format!("Invalid image content type: {}", e)))?;

    Ok(Form::new()
        .text(FIELD_NAME, request.name.clone())
        .text(FIELD_EMAIL, request.email.clone())
        .text(FIELD_NUMBER, request.number.clone())
        .text(FIELD_VEHICLE_TYPE, request.vehicle_type.as_str())
        .part(FIELD_VEHICLE_IMAGE, image))
}

impl ApiClient {
    /// Issue exactly one POST for the request and interpret the response.
    pub async fn submit_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, SubmitError> {
        let form = build_form(request)?;

        tracing::info!(
            url = %self.upload_url(),
            vehicle_type = %request.vehicle_type,
            file_name = %request.file.display_name,
            size_bytes = request.file.size_bytes,
            "Submitting quote request"
        );

        let response = self
            .client()
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if status.is_success() {
                SubmitError::Unknown(format!("Failed to read response body: {}", e))
            } else {
                classify_transport_error(&e)
            }
        });

        if !status.is_success() {
            // A failure status is reported even when its body cannot be read.
            let message = body
                .ok()
                .and_then(|text| serde_json::from_str::<ServerErrorBody>(&text).ok())
                .and_then(|parsed| parsed.message());
            return Err(SubmitError::Server {
                status: status.as_u16(),
                reason: status.canonical_reason().map(str::to_string),
                message,
            });
        }

        let body = body?;
        tracing::debug!(status = status.as_u16(), "Quote response received");
        Ok(QuoteResponse::from_body(&body))
    }
}
