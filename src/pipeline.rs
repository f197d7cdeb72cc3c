use crate::builder;
use crate::client::Transport;
use crate::encode::{EncodedImage, ImageInput};
use crate::error::{GenerateError, Result};
use crate::models::GenerateResponse;
use uuid::Uuid;

/// Inputs for one generation run, gathered from the caller as-is.
#[derive(Debug, Clone)]
pub struct SceneInputs {
    pub prev_frame: Option<ImageInput>,
    pub characters: Vec<ImageInput>,
    pub prompt: String,
    pub sketch: Option<ImageInput>,
    pub seed: Option<u32>,
}

impl SceneInputs {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prev_frame: None,
            characters: Vec::new(),
            prompt: prompt.into(),
            sketch: None,
            seed: None,
        }
    }

    pub fn with_prev_frame(mut self, prev_frame: ImageInput) -> Self {
        self.prev_frame = Some(prev_frame);
        self
    }

    pub fn with_character(mut self, character: ImageInput) -> Self {
        self.characters.push(character);
        self
    }

    pub fn with_sketch(mut self, sketch: ImageInput) -> Self {
        self.sketch = Some(sketch);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Phases a run moves through. Terminal phases are `Succeeded` and
/// `Failed`; a run never re-enters an earlier phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Validating,
    Encoding,
    Sending,
    Succeeded,
    Failed,
}

/// The single value handed to the presentation layer. Replaces separate
/// loading/result/error flags so contradictory combinations cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Success {
        image: EncodedImage,
    },
    Failure {
        category: &'static str,
        message: String,
        http_status: Option<u16>,
    },
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }
}

impl From<GenerateError> for GenerationOutcome {
    fn from(error: GenerateError) -> Self {
        GenerationOutcome::Failure {
            category: error.category(),
            http_status: error.http_status(),
            message: error.to_string(),
        }
    }
}

/// Per-run bookkeeping. Each user action creates a fresh run with its own
/// id; overlapping runs are independent and never cancel each other.
struct GenerationRun {
    id: Uuid,
    phase: GenerationPhase,
}

impl GenerationRun {
    fn new() -> Self {
        let run = Self {
            id: Uuid::new_v4(),
            phase: GenerationPhase::Idle,
        };
        log::debug!("run {}: created", run.id);
        run
    }

    fn enter(&mut self, phase: GenerationPhase) {
        log::debug!("run {}: {:?} -> {:?}", self.id, self.phase, phase);
        self.phase = phase;
    }
}

/// Drive one generation run end to end: validate, encode, send, interpret.
/// Every failure mode comes back as a `Failure` outcome; the process stays
/// ready for another attempt.
pub async fn run(transport: &dyn Transport, inputs: &SceneInputs) -> GenerationOutcome {
    let mut run = GenerationRun::new();

    match drive(transport, inputs, &mut run).await {
        Ok(image) => {
            run.enter(GenerationPhase::Succeeded);
            log::info!("run {}: scene generated", run.id);
            GenerationOutcome::Success { image }
        }
        Err(error) => {
            run.enter(GenerationPhase::Failed);
            log::warn!("run {}: {}", run.id, error);
            GenerationOutcome::from(error)
        }
    }
}

/// Like [`run`] but keeps the error value, for callers that match on the
/// taxonomy themselves.
pub async fn try_run(transport: &dyn Transport, inputs: &SceneInputs) -> Result<EncodedImage> {
    let mut run = GenerationRun::new();

    match drive(transport, inputs, &mut run).await {
        Ok(image) => {
            run.enter(GenerationPhase::Succeeded);
            Ok(image)
        }
        Err(error) => {
            run.enter(GenerationPhase::Failed);
            Err(error)
        }
    }
}

async fn drive(
    transport: &dyn Transport,
    inputs: &SceneInputs,
    run: &mut GenerationRun,
) -> Result<EncodedImage> {
    run.enter(GenerationPhase::Validating);
    let prev_frame = builder::validate(
        inputs.prev_frame.as_ref(),
        &inputs.characters,
        &inputs.prompt,
    )?;

    run.enter(GenerationPhase::Encoding);
    let request = builder::encode_request(
        prev_frame,
        &inputs.characters,
        &inputs.prompt,
        inputs.sketch.as_ref(),
        inputs.seed,
    )
    .await?;

    run.enter(GenerationPhase::Sending);
    let body = serde_json::to_value(&request).map_err(|e| {
        GenerateError::ClientConfigError(format!("failed to serialize request: {}", e))
    })?;

    let raw = transport.post_json("/generate", body).await?;

    let response: GenerateResponse = serde_json::from_value(raw).map_err(|e| {
        GenerateError::MalformedResponseError(format!("unexpected response shape: {}", e))
    })?;

    match response.img {
        Some(img) if !img.is_empty() => Ok(EncodedImage::from_base64(img)),
        _ => Err(GenerateError::MalformedResponseError(
            "response missing img field".into(),
        )),
    }
}
