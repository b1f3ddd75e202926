use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::engine::config::ServiceConfig;
use crate::engine::error::AdventureError;
use crate::engine::prompt_builder::{scene_response_schema, RequestPayload};
use crate::model::scene::SceneImage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Produces the raw JSON text of the next scene.
pub trait SceneGenerator: Send + Sync {
    fn generate_scene(&self, payload: &RequestPayload) -> Result<String, AdventureError>;
}

/// Produces one illustration for a fully styled prompt.
pub trait ImageGenerator: Send + Sync {
    fn generate_image(&self, prompt: &str) -> Result<SceneImage, AdventureError>;
}

/* =========================
   Wire types
   ========================= */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_options: OutputOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/* =========================
   Client
   ========================= */

/// Talks to the Gemini text endpoint and the Imagen predict endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: ServiceConfig,
}

impl GeminiClient {
    pub fn new(config: ServiceConfig) -> Result<Self, AdventureError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.config.api_base)
    }

    fn request<B: Serialize>(&self, url: String, body: &B) -> RequestBuilder {
        self.client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
    }

    fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: String,
        body: &B,
    ) -> Result<R, AdventureError> {
        let response = self.request(url, body).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl SceneGenerator for GeminiClient {
    fn generate_scene(&self, payload: &RequestPayload) -> Result<String, AdventureError> {
        let request = scene_request(payload);

        log::debug!(
            "scene request to {} ({} chars of context)",
            self.config.text_model,
            payload.user_content.len()
        );

        let response: GenerateContentResponse =
            self.post(self.endpoint(&self.config.text_model, "generateContent"), &request)?;
        extract_text(response)
    }
}

impl ImageGenerator for GeminiClient {
    fn generate_image(&self, prompt: &str) -> Result<SceneImage, AdventureError> {
        let request = image_request(prompt);

        log::debug!("image request to {}", self.config.image_model);

        let response: PredictResponse =
            self.post(self.endpoint(&self.config.image_model, "predict"), &request)?;
        extract_image(response)
    }
}

/// System instruction carries no role; the turn itself is the single user message.
fn scene_request(payload: &RequestPayload) -> GenerateContentRequest {
    GenerateContentRequest {
        system_instruction: Content {
            role: None,
            parts: vec![TextPart {
                text: payload.system_instruction.clone(),
            }],
        },
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![TextPart {
                text: payload.user_content.clone(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".into(),
            response_schema: scene_response_schema(),
        },
    }
}

fn image_request(prompt: &str) -> PredictRequest {
    PredictRequest {
        instances: vec![PredictInstance {
            prompt: prompt.to_string(),
        }],
        parameters: PredictParameters {
            sample_count: 1,
            aspect_ratio: "16:9".into(),
            output_options: OutputOptions {
                mime_type: "image/jpeg".into(),
            },
        },
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, AdventureError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AdventureError::MalformedResponse(format!(
            "prompt was blocked: {reason}"
        )));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AdventureError::MalformedResponse(
            "scene service returned no text".into(),
        ));
    }

    Ok(text)
}

fn extract_image(response: PredictResponse) -> Result<SceneImage, AdventureError> {
    let encoded = response
        .predictions
        .into_iter()
        .find_map(|p| p.bytes_base64_encoded)
        .ok_or(AdventureError::ImageGenerationFailed)?;

    let bytes = BASE64_STANDARD.decode(encoded.trim())?;
    decode_scene_image(&bytes)
}

pub fn decode_scene_image(bytes: &[u8]) -> Result<SceneImage, AdventureError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(SceneImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn map_http_error(status: StatusCode, body: &str) -> AdventureError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let msg = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(s) if !s.is_empty() => format!("{s}: {msg}"),
                _ => msg,
            })
        })
        .unwrap_or_else(|| body.trim().to_string());

    AdventureError::RequestFailure(format!("HTTP {}: {message}", status.as_u16()))
}
