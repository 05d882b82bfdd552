use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::ImageGenerationService;
use crate::image::GeneratedImage;
use crate::models::Config;
use crate::request::RequestPart;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use serde::Serialize;
use std::time::Duration;

const SQUARE_ASPECT_RATIO: &str = "1:1";

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

impl ImageRequest {
    fn from_parts(parts: &[RequestPart]) -> Self {
        let parts = parts
            .iter()
            .map(|part| match part {
                RequestPart::Text(text) => Part::Text { text: text.clone() },
                RequestPart::Image(image) => Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.base64_data(),
                    },
                },
            })
            .collect();

        Self {
            contents: vec![Content { role: None, parts }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: SQUARE_ASPECT_RATIO.to_string(),
                }),
            },
        }
    }
}

/// First inline image of the first candidate, decoded.
fn extract_first_image(response: GenerateContentResponse) -> Result<GeneratedImage> {
    let candidate = response.candidates.into_iter().next();
    if let Some(reason) = candidate.as_ref().and_then(|c| c.finish_reason.as_deref()) {
        tracing::debug!("Gemini finish reason: {}", reason);
    }

    let image_data = candidate
        .and_then(|c| c.content)
        .and_then(|content| {
            content.parts.into_iter().find_map(|p| match p {
                Part::InlineData { inline_data } => Some(inline_data),
                _ => None,
            })
        })
        .ok_or_else(|| Error::AiProvider("No image produced in Gemini response".to_string()))?;

    tracing::debug!(
        "Gemini returned image with mime_type: {}",
        image_data.mime_type
    );

    base64::engine::general_purpose::STANDARD
        .decode(&image_data.data)
        .map(GeneratedImage::new)
        .map_err(|e| Error::AiProvider(format!("Failed to decode Gemini base64 image: {}", e)))
}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            http: GeminiHttpClient::new(
                config.gemini_api_key.clone(),
                config.image_model.clone(),
                config.request_timeout,
            )
            .with_base_url(config.gemini_base_url.clone()),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, parts: &[RequestPart]) -> Result<GeneratedImage> {
        let image_count = parts
            .iter()
            .filter(|p| matches!(p, RequestPart::Image(_)))
            .count();
        tracing::info!(
            "Requesting image from {} ({} parts, {} images)",
            self.http.model(),
            parts.len(),
            image_count
        );

        let request = ImageRequest::from_parts(parts);
        let gemini_response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let image = extract_first_image(gemini_response)?;
        tracing::info!("Gemini produced image ({} bytes)", image.data.len());
        Ok(image)
    }
}
