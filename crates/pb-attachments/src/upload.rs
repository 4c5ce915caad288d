//! Uploaded files

use bytes::Bytes;

/// A file received from a client, before it is stored
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client
    pub original_name: String,
    /// Declared content type, if the client sent one
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(
        original_name: impl Into<String>,
        content_type: Option<&str>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            content_type: content_type.map(str::to_string),
            data: data.into(),
        }
    }

    /// Lowercase extension of the client file name
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(str::to_ascii_lowercase)
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
