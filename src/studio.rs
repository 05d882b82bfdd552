//! Studio orchestration: state updates, generation and download.

use crate::ai::{GeminiImageClient, ImageGenerationService};
use crate::download;
use crate::image::{self, GeneratedImage, InlineImage};
use crate::models::Config;
use crate::request::GenerationRequest;
use crate::state::{reduce, Action, AppState, ImageSlot, RequestId};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};

/// Fails the in-flight request when a generation future is dropped before
/// it completes.
struct InFlightGuard<'a> {
    studio: &'a Studio,
    id: RequestId,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("[request {}] Generation dropped before completion", self.id);
            self.studio.dispatch(Action::GenerationFailed { id: self.id });
        }
    }
}

/// Owns the studio state and the image generation backend.
///
/// The state lock is never held across an await, so actions can be
/// dispatched while a generation is in flight.
pub struct Studio {
    service: Box<dyn ImageGenerationService>,
    state: Mutex<AppState>,
    output_dir: PathBuf,
}

impl Studio {
    /// Build a studio from a concrete backend.
    ///
    /// This is primarily useful for tests and harnesses that inject mocks.
    pub fn with_service(service: Box<dyn ImageGenerationService>, output_dir: PathBuf) -> Self {
        Self {
            service,
            state: Mutex::new(AppState::default()),
            output_dir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = GeminiImageClient::from_config(config);
        info!("Image provider: Gemini (model: {})", client.model());
        Self::with_service(Box::new(client), PathBuf::from(&config.output_dir))
    }

    /// Construct a studio from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(state: &mut AppState, action: Action) {
        *state = reduce(std::mem::take(state), action);
    }

    pub fn dispatch(&self, action: Action) {
        Self::apply(&mut self.lock_state(), action);
    }

    pub fn snapshot(&self) -> AppState {
        self.lock_state().clone()
    }

    pub fn upload_data_uri(&self, slot: ImageSlot, uri: &str) -> Result<()> {
        let image = InlineImage::from_data_uri(uri)?;
        self.dispatch(Action::SetImage { slot, image });
        Ok(())
    }

    pub async fn upload_file(&self, slot: ImageSlot, path: &Path) -> Result<()> {
        let image = image::load_upload(path).await?;
        self.dispatch(Action::SetImage { slot, image });
        Ok(())
    }

    /// Run one generation from the current state.
    ///
    /// Fails without contacting the backend when the request is invalid or
    /// another generation is in flight. A result that arrives after its
    /// request was abandoned is discarded and reported as
    /// [`Error::Superseded`].
    pub async fn generate(&self) -> Result<GeneratedImage> {
        let (id, request) = {
            let mut state = self.lock_state();
            if state.is_generating {
                return Err(Error::GenerationInProgress);
            }

            let request = GenerationRequest::from_state(&state);
            request.validate()?;

            Self::apply(&mut state, Action::GenerationRequested);
            let id = state.in_flight.ok_or_else(|| {
                Error::Invariant("Generation requested without a request id".to_string())
            })?;
            (id, request)
        };

        let parts = request.parts();
        info!(
            "[request {}] Generating with preset {:?} ({} parts)",
            id,
            request.preset,
            parts.len()
        );

        let mut guard = InFlightGuard {
            studio: self,
            id,
            armed: true,
        };
        let outcome = self.service.generate_image(&parts).await;
        guard.disarm();

        let mut state = self.lock_state();
        match outcome {
            Ok(image) => {
                if !state.accepts(id) {
                    warn!("[request {}] Result arrived after the request was abandoned", id);
                    return Err(Error::Superseded(id));
                }
                info!("[request {}] Generated image ({} bytes)", id, image.data.len());
                Self::apply(
                    &mut state,
                    Action::GenerationSucceeded {
                        id,
                        image: image.clone(),
                    },
                );
                Ok(image)
            }
            Err(e) => {
                error!("[request {}] Generation failed: {}", id, e);
                Self::apply(&mut state, Action::GenerationFailed { id });
                Err(e)
            }
        }
    }

    /// Save the current result into the output directory.
    pub async fn download(&self) -> Result<PathBuf> {
        self.download_to(&self.output_dir).await
    }

    pub async fn download_to(&self, dir: &Path) -> Result<PathBuf> {
        let image = self
            .lock_state()
            .result
            .clone()
            .ok_or(Error::NothingToDownload)?;
        download::save_image(&image, dir).await
    }
}
