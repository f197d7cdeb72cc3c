use crate::encode::{self, ImageInput};
use crate::error::{GenerateError, Result};
use crate::models::GenerateRequest;
use futures::future;

/// Static preconditions, checked before any encoding starts. Fail fast,
/// first violation wins. Returns the previous frame so callers hold the
/// proof that it exists.
pub fn validate<'a>(
    prev_frame: Option<&'a ImageInput>,
    characters: &[ImageInput],
    prompt: &str,
) -> Result<&'a ImageInput> {
    let prev_frame = prev_frame.ok_or_else(|| {
        GenerateError::ValidationError("missing previous frame".into())
    })?;
    if characters.is_empty() {
        return Err(GenerateError::ValidationError(
            "missing character image".into(),
        ));
    }
    if prompt.trim().is_empty() {
        return Err(GenerateError::ValidationError("missing prompt".into()));
    }
    Ok(prev_frame)
}

/// Encode already-validated inputs into a ready-to-send request.
///
/// All images are encoded concurrently; the characters field keeps the
/// caller's input order regardless of which encode finishes first, since
/// order controls visual layering downstream. Any single encode failure
/// fails the whole build with no partial request.
pub async fn encode_request(
    prev_frame: &ImageInput,
    characters: &[ImageInput],
    prompt: &str,
    sketch: Option<&ImageInput>,
    seed: Option<u32>,
) -> Result<GenerateRequest> {
    let (prev_frame, characters, sketch) = futures::try_join!(
        encode::encode(prev_frame),
        future::try_join_all(characters.iter().map(encode::encode)),
        async {
            match sketch {
                Some(input) => encode::encode(input).await.map(Some),
                None => Ok(None),
            }
        },
    )?;

    Ok(GenerateRequest {
        prev_frame,
        characters,
        prompt: prompt.trim().to_string(),
        sketch,
        seed,
    })
}

/// One-shot entry: validate, then encode.
pub async fn build(
    prev_frame: Option<&ImageInput>,
    characters: &[ImageInput],
    prompt: &str,
    sketch: Option<&ImageInput>,
    seed: Option<u32>,
) -> Result<GenerateRequest> {
    let prev_frame = validate(prev_frame, characters, prompt)?;
    encode_request(prev_frame, characters, prompt, sketch, seed).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(byte: u8) -> ImageInput {
        ImageInput::from_bytes(vec![byte; 4])
    }

    #[test]
    fn test_validation_order_prev_frame_first() {
        // All three preconditions are violated; the previous frame wins.
        let err = validate(None, &[], "   ").unwrap_err();
        assert_eq!(
            err,
            GenerateError::ValidationError("missing previous frame".into())
        );
    }

    #[test]
    fn test_validation_order_characters_second() {
        let prev = image(1);
        let err = validate(Some(&prev), &[], "").unwrap_err();
        assert_eq!(
            err,
            GenerateError::ValidationError("missing character image".into())
        );
    }

    #[test]
    fn test_validate_returns_the_previous_frame() {
        let prev = image(1);
        let characters = vec![image(2)];
        let validated = validate(Some(&prev), &characters, "dawn").unwrap();
        assert!(std::ptr::eq(validated, &prev));
    }

    #[tokio::test]
    async fn test_build_still_rejects_missing_previous_frame() {
        let characters = vec![image(2)];
        let err = build(None, &characters, "dawn", None, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::ValidationError("missing previous frame".into())
        );
    }

    #[test]
    fn test_whitespace_prompt_is_rejected() {
        let prev = image(1);
        let characters = vec![image(2)];
        let err = validate(Some(&prev), &characters, " \t\n ").unwrap_err();
        assert_eq!(err, GenerateError::ValidationError("missing prompt".into()));
    }

    #[tokio::test]
    async fn test_character_order_is_preserved() {
        let prev = image(0);
        let characters: Vec<ImageInput> = (1u8..=5).map(image).collect();

        let request = build(Some(&prev), &characters, "forest clearing", None, None)
            .await
            .unwrap();

        assert_eq!(request.characters.len(), 5);
        for (i, encoded) in request.characters.iter().enumerate() {
            assert_eq!(encoded.decode().unwrap(), vec![(i + 1) as u8; 4]);
        }
    }

    #[tokio::test]
    async fn test_prompt_is_trimmed() {
        let prev = image(1);
        let characters = vec![image(2)];
        let request = build(Some(&prev), &characters, "  under the old oak  ", None, None)
            .await
            .unwrap();
        assert_eq!(request.prompt, "under the old oak");
    }

    #[tokio::test]
    async fn test_seed_zero_is_kept() {
        let prev = image(1);
        let characters = vec![image(2)];
        let request = build(Some(&prev), &characters, "night sky", None, Some(0))
            .await
            .unwrap();
        assert_eq!(request.seed, Some(0));

        let request = build(Some(&prev), &characters, "night sky", None, None)
            .await
            .unwrap();
        assert_eq!(request.seed, None);
    }

    #[tokio::test]
    async fn test_encode_failure_fails_the_whole_build() {
        let prev = image(1);
        let characters = vec![image(2), ImageInput::from_bytes(Vec::new())];
        let err = build(Some(&prev), &characters, "beach at dawn", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.category(), "encoding");
    }
}
