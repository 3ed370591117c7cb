//! Image files uploaded as pet photos

use crate::error::{Error, Result};
use bytes::Bytes;
use std::path::Path;

/// A photo ready to be sent as a multipart file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetPhoto {
    file_name: String,
    mime_type: String,
    bytes: Bytes,
}

impl PetPhoto {
    /// Build a photo from in-memory bytes.
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a photo from disk. The MIME type comes from the extension;
    /// only JPEG and PNG are accepted.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_for(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidRequest(format!("photo path {:?} has no file name", path)))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Io(e).context(format!("reading photo {}", path.display())))?;

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes: Bytes::from(bytes),
        })
    }

    /// File name sent in the `Content-Disposition` header.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type of the part.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw contents.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

fn mime_for(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        _ => Err(Error::InvalidRequest(format!(
            "unsupported photo format: {}",
            path.display()
        ))),
    }
}
