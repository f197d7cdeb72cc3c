use crate::encode::EncodedImage;
use serde::{Deserialize, Serialize};

/// JSON body for `POST /generate`. Built fresh for every user action,
/// never cached or reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prev_frame: EncodedImage,
    pub characters: Vec<EncodedImage>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sketch: Option<EncodedImage>,
    /// Omitted entirely when absent so the service picks its own seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub img: Option<String>,
}

/// Structured error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}
