//! Limits and user-facing strings shared by the form, the validator and the views.

/// Upload size limit in MiB.
pub const MAX_FILE_SIZE_MB: usize = 6;

/// Upload size limit in bytes (inclusive).
pub const MAX_FILE_SIZE_BYTES: usize = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Declared MIME types accepted by the file validator.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/bmp",
    "image/gif",
];

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:4000/api/upload";

// Multipart field names expected by the quoting service.
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_NUMBER: &str = "number";
pub const FIELD_VEHICLE_TYPE: &str = "vehicleType";
pub const FIELD_VEHICLE_IMAGE: &str = "vehicleImage";

pub const MSG_NO_FILE: &str = "Please select an image to upload.";
pub const MSG_NO_VEHICLE_TYPE: &str = "Please select a vehicle type.";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MSG_NO_RESPONSE: &str = "No response received from server.";
pub const MSG_SERVER_FALLBACK: &str = "Server responded with an error.";
pub const MSG_UNDECODABLE: &str = "The selected image could not be read.";
pub const MSG_NO_BASE_PRICE: &str = " No base price available.";

pub const LABEL_SUBMIT: &str = "Submit and Classify";
pub const LABEL_UPLOADING: &str = "Uploading...";
pub const LABEL_DROP_HINT: &str = "Click to upload or drag and drop";
pub const LABEL_FILE_INFO: &str = "PNG, JPG, BMP, or GIF (MAX. 6MB)";

/// Alert shown when a candidate file fails type or size validation.
pub fn invalid_file_alert(max_size_mb: usize) -> String {
    format!(
        "Invalid file type or size. Please upload PNG, JPG, jpeg, BMP, or GIF up to {}MB.",
        max_size_mb
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_size_is_six_mebibytes() {
        assert_eq!(MAX_FILE_SIZE_BYTES, 6_291_456);
    }

    #[test]
    fn invalid_file_alert_mentions_limit() {
        assert_eq!(
            invalid_file_alert(6),
            "Invalid file type or size. Please upload PNG, JPG, jpeg, BMP, or GIF up to 6MB."
        );
    }
}
