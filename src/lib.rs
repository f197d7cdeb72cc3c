pub mod builder;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod logger;
pub mod models;
pub mod pipeline;

pub use client::{HttpTransport, PictureBookClient, Transport};
pub use config::ServiceConfig;
pub use encode::{encode, EncodedImage, ImageInput};
pub use error::{GenerateError, Result};
pub use models::{ErrorBody, GenerateRequest, GenerateResponse, HealthResponse};
pub use pipeline::{GenerationOutcome, GenerationPhase, SceneInputs};
