use thiserror::Error;

/// Everything that can go wrong talking to the generative services.
///
/// Every variant is terminal for the request that produced it; nothing retries.
#[derive(Debug, Error)]
pub enum AdventureError {
    /// Network or service-level failure from either service.
    #[error("request failed: {0}")]
    RequestFailure(String),

    /// The service answered, but not in the agreed shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("image generation failed: the service returned no image")]
    ImageGenerationFailed,
}

impl From<reqwest::Error> for AdventureError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdventureError::MalformedResponse(err.to_string())
        } else {
            AdventureError::RequestFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdventureError {
    fn from(err: serde_json::Error) -> Self {
        AdventureError::MalformedResponse(err.to_string())
    }
}

impl From<base64::DecodeError> for AdventureError {
    fn from(err: base64::DecodeError) -> Self {
        AdventureError::MalformedResponse(format!("image payload is not base64: {err}"))
    }
}

impl From<image::ImageError> for AdventureError {
    fn from(err: image::ImageError) -> Self {
        AdventureError::MalformedResponse(format!("image could not be decoded: {err}"))
    }
}
