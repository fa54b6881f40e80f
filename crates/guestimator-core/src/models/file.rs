use bytes::Bytes;
use serde::Serialize;

/// Where a candidate file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSource {
    Picker,
    Drop,
}

/// Raw file handed over by the picker or a drop, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub bytes: Bytes,
    /// MIME type reported by the platform, not sniffed from the bytes.
    pub declared_mime_type: String,
    pub display_name: String,
}

impl CandidateFile {
    pub fn new(
        bytes: impl Into<Bytes>,
        declared_mime_type: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            declared_mime_type: declared_mime_type.into(),
            display_name: display_name.into(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// A candidate that passed validation. At most one is held by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    #[serde(skip)]
    pub bytes: Bytes,
    pub declared_mime_type: String,
    pub size_bytes: usize,
    pub display_name: String,
}

impl From<CandidateFile> for SelectedFile {
    fn from(candidate: CandidateFile) -> Self {
        let size_bytes = candidate.bytes.len();
        Self {
            bytes: candidate.bytes,
            declared_mime_type: candidate.declared_mime_type,
            size_bytes,
            display_name: candidate.display_name,
        }
    }
}

/// Displayable rendition of the selected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewImage {
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}
