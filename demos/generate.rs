use picbook::{GenerationOutcome, ImageInput, PictureBookClient, SceneInputs, ServiceConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    picbook::logger::init()?;

    let config = ServiceConfig::from_env();
    let client = PictureBookClient::new(config)?;

    let health = client.health().await?;
    log::info!(
        "Service status: {:?}, model loaded: {:?}",
        health.status,
        health.model_loaded
    );

    let prev_frame = env::var("PREV_FRAME").unwrap_or_else(|_| "scene_01.png".to_string());
    let character = env::var("CHARACTER").unwrap_or_else(|_| "fox.png".to_string());

    let inputs = SceneInputs::new("The fox walks into the moonlit forest")
        .with_prev_frame(ImageInput::from_path(prev_frame))
        .with_character(ImageInput::from_path(character))
        .with_seed(42);

    match client.generate(&inputs).await {
        GenerationOutcome::Success { image } => {
            let bytes = image.decode()?;
            tokio::fs::write("generated.png", &bytes).await?;
            log::info!("🖼  Scene written to generated.png ({} bytes)", bytes.len());
        }
        GenerationOutcome::Failure {
            category,
            message,
            http_status,
        } => {
            log::error!(
                "Generation failed [{}] (status {:?}): {}",
                category,
                http_status,
                message
            );
        }
    }

    Ok(())
}
