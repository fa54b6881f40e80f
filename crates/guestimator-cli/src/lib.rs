use anyhow::{Context, Result};
use guestimator_core::constants::ACCEPTED_EXTENSIONS;
use guestimator_core::content_type_for_filename;
use guestimator_core::models::CandidateFile;
use guestimator_core::UploadForm;
use serde::Serialize;
use std::path::Path;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Read a local file the way a file picker hands it over: bytes, display name and the MIME
/// type implied by its extension (unless overridden).
pub fn read_candidate(path: &Path, content_type: Option<&str>) -> Result<CandidateFile> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let display_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        tracing::warn!(
            file_name = %display_name,
            accepted = ?ACCEPTED_EXTENSIONS,
            "File extension is not one the picker offers"
        );
    }

    let declared = content_type
        .map(str::to_string)
        .unwrap_or_else(|| content_type_for_filename(&display_name).to_string());

    Ok(CandidateFile::new(bytes, declared, display_name))
}

/// Length of the `data:` URL prefix kept in printed output.
pub const DATA_URL_PREVIEW_LEN: usize = 64;

/// Copy of the form state for `--json` output, with the preview `data:` URL shortened.
pub fn printable_state(state: &UploadForm) -> UploadForm {
    let mut printable = state.clone();
    if let Some(preview) = printable.preview.as_mut() {
        preview.data_url = truncate_string(&preview.data_url, DATA_URL_PREVIEW_LEN);
    }
    printable
}

/// Summary printed by `guestimator check`.
#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}

impl CheckSummary {
    pub fn from_state(state: &UploadForm) -> Self {
        let file = state.selected_file.as_ref();
        let preview = state.preview.as_ref();
        Self {
            accepted: file.is_some(),
            file_name: file.map(|f| f.display_name.clone()),
            content_type: file.map(|f| f.declared_mime_type.clone()),
            size_bytes: file.map(|f| f.size_bytes),
            width: preview.map(|p| p.width),
            height: preview.map(|p| p.height),
            data_url: preview.map(|p| truncate_string(&p.data_url, DATA_URL_PREVIEW_LEN)),
            alert: state.file_alert.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guestimator_core::models::{PreviewImage, SelectedFile};
    use std::io::Write;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn read_candidate_infers_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.JPG");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"jpeg-ish").unwrap();

        let candidate = read_candidate(&path, None).unwrap();
        assert_eq!(candidate.display_name, "car.JPG");
        assert_eq!(candidate.declared_mime_type, "image/jpeg");
        assert_eq!(candidate.size_bytes(), 8);
    }

    #[test]
    fn read_candidate_honors_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("car.txt");
        std::fs::write(&path, b"text").unwrap();

        let candidate = read_candidate(&path, Some("image/gif")).unwrap();
        assert_eq!(candidate.declared_mime_type, "image/gif");
    }

    #[test]
    fn read_candidate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_candidate(&dir.path().join("absent.png"), None).is_err());
    }

    #[test]
    fn check_summary_reports_rejection() {
        let state = UploadForm {
            file_alert: Some("Invalid file type or size.".to_string()),
            ..UploadForm::default()
        };
        let summary = CheckSummary::from_state(&state);
        assert!(!summary.accepted);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["alert"], "Invalid file type or size.");
        assert!(json.get("file_name").is_none());
    }

    #[test]
    fn check_summary_reports_preview() {
        let state = UploadForm {
            selected_file: Some(SelectedFile::from(CandidateFile::new(
                vec![0u8; 12],
                "image/png",
                "car.png",
            ))),
            preview: Some(PreviewImage {
                data_url: format!("data:image/png;base64,{}", "A".repeat(200)),
                width: 8,
                height: 4,
            }),
            ..UploadForm::default()
        };
        let summary = CheckSummary::from_state(&state);
        assert!(summary.accepted);
        assert_eq!(summary.size_bytes, Some(12));
        assert_eq!(summary.width, Some(8));
        assert_eq!(summary.data_url.unwrap().len(), DATA_URL_PREVIEW_LEN);
    }

    #[test]
    fn printable_state_shortens_preview() {
        let state = UploadForm {
            preview: Some(PreviewImage {
                data_url: format!("data:image/png;base64,{}", "A".repeat(10_000)),
                width: 8,
                height: 4,
            }),
            ..UploadForm::default()
        };
        let printable = printable_state(&state);
        let json = serde_json::to_value(&printable).unwrap();
        let data_url = json["preview"]["data_url"].as_str().unwrap();
        assert_eq!(data_url.len(), DATA_URL_PREVIEW_LEN);
        assert!(data_url.starts_with("data:image/png;base64,"));
        assert_eq!(json["preview"]["width"], 8);
        assert_eq!(state.preview.unwrap().data_url.len(), 10_022);
    }
}
