//! Preview decoding - turns the selected file into a displayable data URL

use base64::{engine::general_purpose, Engine as _};
use image::{GenericImageView, ImageReader};
use std::io::Cursor;

use crate::error::ValidationError;
use crate::models::{PreviewImage, SelectedFile};

pub struct PreviewDecoder;

impl PreviewDecoder {
    /// Decode the image and build its data URL.
    ///
    /// The data URL uses the declared MIME type, like a browser `FileReader` does.
    pub fn decode(data: &[u8], declared_mime_type: &str) -> Result<PreviewImage, ValidationError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ValidationError::Undecodable(e.to_string()))?;
        let img = reader
            .decode()
            .map_err(|e| ValidationError::Undecodable(e.to_string()))?;
        let (width, height) = img.dimensions();

        Ok(PreviewImage {
            data_url: Self::data_url(data, declared_mime_type),
            width,
            height,
        })
    }

    pub fn data_url(data: &[u8], mime_type: &str) -> String {
        format!(
            "data:{};base64,{}",
            mime_type,
            general_purpose::STANDARD.encode(data)
        )
    }

    /// Decode off the async worker pool; image decoding is CPU-bound.
    pub async fn decode_file(file: &SelectedFile) -> Result<PreviewImage, ValidationError> {
        let data = file.bytes.clone();
        let mime = file.declared_mime_type.clone();
        tokio::task::spawn_blocking(move || Self::decode(&data, &mime))
            .await
            .map_err(|e| ValidationError::Undecodable(format!("Preview task failed: {}", e)))?
    }
}
