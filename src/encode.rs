use crate::error::{GenerateError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A raw image handed to the pipeline by the caller. The bytes either live
/// in memory already or are read from disk when the encoder runs.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub name: Option<String>,
    source: ImageSource,
}

#[derive(Debug, Clone)]
enum ImageSource {
    Memory(Vec<u8>),
    Path(PathBuf),
}

impl ImageInput {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            source: ImageSource::Memory(data.into()),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Self {
            name,
            source: ImageSource::Path(path),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// A transport-safe base64 payload with no MIME prefix. Decodes
/// byte-for-byte back to the original image content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap an already-encoded base64 payload, e.g. the `img` field of a
    /// service response.
    pub fn from_base64(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// Accept a full data URL (`data:image/png;base64,...`) and keep only
    /// the payload after the first comma.
    pub fn from_data_url(data_url: &str) -> Self {
        match data_url.split_once(',') {
            Some((_, payload)) => Self(payload.to_string()),
            None => Self(data_url.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| GenerateError::EncodingError(format!("invalid base64 payload: {}", e)))
    }
}

/// Encode a raw image into its transport form. Suspends while reading
/// path-backed inputs from disk.
pub async fn encode(input: &ImageInput) -> Result<EncodedImage> {
    let bytes = match &input.source {
        ImageSource::Memory(data) => data.clone(),
        ImageSource::Path(path) => tokio::fs::read(path).await.map_err(|e| {
            GenerateError::EncodingError(format!(
                "failed to read image '{}': {}",
                input.display_name(),
                e
            ))
        })?,
    };

    if bytes.is_empty() {
        return Err(GenerateError::EncodingError(format!(
            "image '{}' is empty",
            input.display_name()
        )));
    }

    Ok(EncodedImage(STANDARD.encode(&bytes)))
}
