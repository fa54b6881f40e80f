//! Text rendering of the form state.

use serde::Serialize;

use crate::constants::{
    LABEL_DROP_HINT, LABEL_FILE_INFO, LABEL_SUBMIT, LABEL_UPLOADING, MSG_NO_BASE_PRICE,
};
use crate::models::{QuoteResponse, SubmissionResult};
use crate::state::UploadForm;

/// What the form shows for its current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub dragging: bool,
    pub upload_area: Vec<String>,
    pub alert: Option<String>,
    pub results: Option<Vec<String>>,
    pub error: Option<String>,
}

impl FormView {
    pub fn render(state: &UploadForm) -> Self {
        let mut upload_area = Vec::new();
        match &state.preview {
            Some(preview) => upload_area.push(format!(
                "[preview {}x{}]",
                preview.width, preview.height
            )),
            None => upload_area.push(LABEL_DROP_HINT.to_string()),
        }
        if let Some(file) = &state.selected_file {
            upload_area.push(file.display_name.clone());
        }
        upload_area.push(LABEL_FILE_INFO.to_string());

        let (results, error) = match &state.result {
            SubmissionResult::Success(quote) => (Some(result_lines(quote)), None),
            SubmissionResult::Failure(message) => (None, Some(message.clone())),
            SubmissionResult::NotStarted | SubmissionResult::InFlight => (None, None),
        };

        Self {
            submit_label: if state.is_uploading() {
                LABEL_UPLOADING
            } else {
                LABEL_SUBMIT
            },
            submit_enabled: state.can_submit(),
            dragging: state.dragging,
            upload_area,
            alert: state.file_alert.clone(),
            results,
            error,
        }
    }

    /// Results and error sections as plain text.
    pub fn outcome_text(&self) -> String {
        let mut out = Vec::new();
        if let Some(lines) = &self.results {
            out.push("Results".to_string());
            out.extend(lines.iter().cloned());
        }
        if let Some(error) = &self.error {
            out.push("Error".to_string());
            out.push(error.clone());
        }
        out.join("\n")
    }
}

/// Echoed form fields followed by the insurance summary.
pub fn result_lines(quote: &QuoteResponse) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(echo) = &quote.form_data {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        lines.push(format!("Name: {}", field(&echo.name)));
        lines.push(format!("Email: {}", field(&echo.email)));
        lines.push(format!("Number: {}", field(&echo.number)));
        lines.push(format!("Vehicle Type Chosen: {}", field(&echo.vehicle_type)));
    }
    let summary = quote
        .base_price_text()
        .unwrap_or_else(|| MSG_NO_BASE_PRICE.to_string());
    lines.push(format!("Insurance Summary:{}", summary));
    lines
}
