//! AI service integration for image generation
//!
//! Provides the remote image-generation seam used by the studio, a Gemini
//! REST implementation, and an in-memory mock.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiImageClient;
pub use mock::MockImageGenerationClient;

use crate::image::GeneratedImage;
use crate::request::RequestPart;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Submit `parts` in order and return the first image in the response.
    async fn generate_image(&self, parts: &[RequestPart]) -> Result<GeneratedImage>;
}
