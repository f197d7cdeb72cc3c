pub mod transport;

use crate::config::ServiceConfig;
use crate::encode::EncodedImage;
use crate::error::{GenerateError, Result};
use crate::models::HealthResponse;
use crate::pipeline::{self, GenerationOutcome, SceneInputs};
use std::sync::Arc;

pub use transport::{HttpTransport, Transport};

/// Entry point for callers. Holds the one shared transport for the life of
/// the process; cheap to clone.
#[derive(Clone)]
pub struct PictureBookClient {
    transport: Arc<dyn Transport>,
}

impl PictureBookClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        crate::logger::log_client_info(&config);
        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// Swap in a different transport, mainly for tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Run a full generation and fold every failure mode into one
    /// displayable outcome.
    pub async fn generate(&self, inputs: &SceneInputs) -> GenerationOutcome {
        pipeline::run(self.transport.as_ref(), inputs).await
    }

    /// Run a full generation, keeping the typed error for callers that
    /// dispatch on it.
    pub async fn try_generate(&self, inputs: &SceneInputs) -> Result<EncodedImage> {
        pipeline::try_run(self.transport.as_ref(), inputs).await
    }

    /// Read-only service health probe.
    pub async fn health(&self) -> Result<HealthResponse> {
        let raw = self.transport.get_json("/health").await?;
        serde_json::from_value(raw).map_err(|e| {
            GenerateError::MalformedResponseError(format!("unexpected health shape: {}", e))
        })
    }

    /// Read-only CORS diagnostic; the body shape is service-defined.
    pub async fn test_cors(&self) -> Result<serde_json::Value> {
        self.transport.get_json("/test-cors").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct StaticTransport {
        reply: Value,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn post_json(&self, _path: &str, _body: Value) -> Result<Value> {
            Ok(self.reply.clone())
        }

        async fn get_json(&self, _path: &str) -> Result<Value> {
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_health_parses_service_fields() {
        let client = PictureBookClient::with_transport(Arc::new(StaticTransport {
            reply: json!({"status": "ok", "model_loaded": true}),
        }));

        let health = client.health().await.unwrap();
        assert_eq!(health.status.as_deref(), Some("ok"));
        assert_eq!(health.model_loaded, Some(true));
    }

    #[tokio::test]
    async fn test_generate_goes_through_shared_transport() {
        use crate::encode::ImageInput;

        let client = PictureBookClient::with_transport(Arc::new(StaticTransport {
            reply: json!({"img": "QUJD"}),
        }));

        let inputs = SceneInputs::new("a quiet meadow")
            .with_prev_frame(ImageInput::from_bytes(b"prev".to_vec()))
            .with_character(ImageInput::from_bytes(b"char".to_vec()));

        let image = client.try_generate(&inputs).await.unwrap();
        assert_eq!(image.as_str(), "QUJD");
    }
}
