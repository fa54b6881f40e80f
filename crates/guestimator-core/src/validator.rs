use std::path::Path;

use crate::config::FormConfig;
use crate::error::ValidationError;
use crate::models::{CandidateFile, FileSource, SelectedFile};

/// Candidate file validator
///
/// Trust is placed on the declared MIME type. Content sniffing is opt-in.
#[derive(Clone, Debug)]
pub struct FileValidator {
    max_file_size: usize,
    allowed_content_types: Vec<String>,
    sniff_content: bool,
}

impl FileValidator {
    pub fn new(max_file_size: usize, allowed_content_types: Vec<String>, sniff_content: bool) -> Self {
        Self {
            max_file_size,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
            sniff_content,
        }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(
            config.max_file_size_bytes(),
            config.allowed_content_types.clone(),
            config.sniff_content,
        )
    }

    /// Validate content type
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = normalize_content_type(content_type);

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate file size (limit is inclusive)
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Check that the leading bytes agree with the declared type.
    pub fn validate_content_matches(
        &self,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let declared = canonical_content_type(content_type);
        let detected = image::guess_format(data)
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        if detected != declared {
            return Err(ValidationError::ContentMismatch {
                declared: content_type.to_string(),
                detected,
            });
        }

        Ok(())
    }

    /// Accept or reject a candidate. Type is checked before size.
    ///
    /// The accepted file carries the normalized type that was checked against the allow-list.
    pub fn validate_candidate(
        &self,
        mut candidate: CandidateFile,
        source: FileSource,
    ) -> Result<SelectedFile, ValidationError> {
        let result = self
            .validate_content_type(&candidate.declared_mime_type)
            .and_then(|_| self.validate_file_size(candidate.size_bytes()))
            .and_then(|_| {
                if self.sniff_content {
                    self.validate_content_matches(&candidate.bytes, &candidate.declared_mime_type)
                } else {
                    Ok(())
                }
            });

        match result {
            Ok(()) => {
                candidate.declared_mime_type = normalize_content_type(&candidate.declared_mime_type);
                tracing::debug!(
                    file_name = %candidate.display_name,
                    content_type = %candidate.declared_mime_type,
                    size_bytes = candidate.size_bytes(),
                    source = ?source,
                    "Accepted candidate file"
                );
                Ok(SelectedFile::from(candidate))
            }
            Err(e) => {
                tracing::debug!(
                    file_name = %candidate.display_name,
                    source = ?source,
                    error = %e,
                    "Rejected candidate file"
                );
                Err(e)
            }
        }
    }
}

fn normalize_content_type(content_type: &str) -> String {
    content_type.trim().to_lowercase()
}

/// `image/jpg` is a common alias of `image/jpeg`.
fn canonical_content_type(content_type: &str) -> String {
    let normalized = normalize_content_type(content_type);
    match normalized.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        "image/x-ms-bmp" => "image/bmp".to_string(),
        _ => normalized,
    }
}

/// MIME type a browser would report for a file name, by extension.
pub fn content_type_for_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
