//! Request construction
//!
//! Turns a snapshot of the studio state into the final prompt and the ordered
//! list of parts sent to the image model.

use crate::image::InlineImage;
use crate::models::{Mode, Preset};
use crate::prompts;
use crate::state::AppState;
use crate::{Error, Result};

/// One element of the outbound content, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPart {
    Text(String),
    Image(InlineImage),
}

/// Everything needed for one generation call.
///
/// `primary_image` is only set in edit mode; `secondary_image` only for the
/// compose preset and only alongside a primary image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub preset: Preset,
    pub prompt_text: String,
    pub primary_image: Option<InlineImage>,
    pub secondary_image: Option<InlineImage>,
}

impl GenerationRequest {
    pub fn from_state(state: &AppState) -> Self {
        let preset = state.active_preset();
        let primary_image = match preset.mode() {
            Mode::Edit => state.primary_image.clone(),
            Mode::Create => None,
        };
        let secondary_image = if preset.is_compose() && primary_image.is_some() {
            state.secondary_image.clone()
        } else {
            None
        };

        Self {
            preset,
            prompt_text: state.prompt.clone(),
            primary_image,
            secondary_image,
        }
    }

    pub fn mode(&self) -> Mode {
        self.preset.mode()
    }

    /// Reject requests that must not reach the remote service.
    pub fn validate(&self) -> Result<()> {
        if self.mode() == Mode::Create && self.prompt_text.trim().is_empty() {
            return Err(Error::Validation(
                "A prompt is required to create an image".to_string(),
            ));
        }
        Ok(())
    }

    pub fn final_prompt(&self) -> String {
        prompts::frame(self.preset, &self.prompt_text)
    }

    /// Text first, then the primary image, then the secondary image.
    pub fn parts(&self) -> Vec<RequestPart> {
        let mut parts = vec![RequestPart::Text(self.final_prompt())];
        parts.extend(
            [&self.primary_image, &self.secondary_image]
                .into_iter()
                .flatten()
                .cloned()
                .map(RequestPart::Image),
        );
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatePreset, EditPreset};
    use pretty_assertions::assert_eq;

    fn primary() -> InlineImage {
        InlineImage::new("image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn secondary() -> InlineImage {
        InlineImage::new("image/png", vec![0x89, 0x50, 0x4E, 0x47])
    }

    fn edit_state(preset: EditPreset) -> AppState {
        AppState {
            mode: Mode::Edit,
            edit_preset: preset,
            prompt: "at the beach".to_string(),
            primary_image: Some(primary()),
            secondary_image: Some(secondary()),
            ..AppState::default()
        }
    }

    #[test]
    fn test_create_request_has_only_text() {
        let state = AppState {
            mode: Mode::Create,
            create_preset: CreatePreset::Sticker,
            prompt: "a cat".to_string(),
            primary_image: Some(primary()),
            secondary_image: Some(secondary()),
            ..AppState::default()
        };

        let request = GenerationRequest::from_state(&state);
        assert_eq!(request.primary_image, None);
        assert_eq!(request.secondary_image, None);
        assert_eq!(
            request.parts(),
            vec![RequestPart::Text(
                "Sticker style, die-cut, white border around, flat illustration: a cat"
                    .to_string()
            )]
        );
    }

    #[test]
    fn test_compose_with_both_images_has_three_ordered_parts() {
        let request = GenerationRequest::from_state(&edit_state(EditPreset::Compose));
        assert_eq!(
            request.parts(),
            vec![
                RequestPart::Text(
                    "Merge and blend these two images naturally into one scene: at the beach"
                        .to_string()
                ),
                RequestPart::Image(primary()),
                RequestPart::Image(secondary()),
            ]
        );
    }

    #[test]
    fn test_compose_with_missing_secondary_has_two_parts() {
        let mut state = edit_state(EditPreset::Compose);
        state.secondary_image = None;

        let parts = GenerationRequest::from_state(&state).parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1], RequestPart::Image(primary()));
    }

    #[test]
    fn test_compose_without_primary_sends_text_only() {
        let mut state = edit_state(EditPreset::Compose);
        state.primary_image = None;

        let request = GenerationRequest::from_state(&state);
        assert_eq!(request.secondary_image, None);

        let parts = request.parts();
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], RequestPart::Text(_)));
    }

    #[test]
    fn test_non_compose_edit_never_sends_secondary() {
        for preset in [
            EditPreset::AddRemove,
            EditPreset::Retouch,
            EditPreset::Style,
        ] {
            let parts = GenerationRequest::from_state(&edit_state(preset)).parts();
            assert_eq!(parts.len(), 2, "{:?}", preset);
            assert_eq!(parts[1], RequestPart::Image(primary()));
            assert!(!parts.contains(&RequestPart::Image(secondary())));
        }
    }

    #[test]
    fn test_edit_without_images_sends_text_only() {
        let mut state = edit_state(EditPreset::Retouch);
        state.primary_image = None;
        state.secondary_image = None;

        assert_eq!(GenerationRequest::from_state(&state).parts().len(), 1);
    }

    #[test]
    fn test_empty_prompt_rejected_in_create_mode() {
        let state = AppState {
            prompt: "   ".to_string(),
            ..AppState::default()
        };
        let err = GenerationRequest::from_state(&state).validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_empty_prompt_allowed_in_edit_mode() {
        let mut state = edit_state(EditPreset::Retouch);
        state.prompt.clear();

        let request = GenerationRequest::from_state(&state);
        assert!(request.validate().is_ok());
        assert_eq!(
            request.final_prompt(),
            "Professionally retouch and enhance details: "
        );
    }

    #[test]
    fn test_uses_preset_of_current_mode() {
        let mut state = edit_state(EditPreset::Style);
        state.create_preset = CreatePreset::Comic;

        assert_eq!(
            GenerationRequest::from_state(&state).preset,
            Preset::Edit(EditPreset::Style)
        );

        state.mode = Mode::Create;
        assert_eq!(
            GenerationRequest::from_state(&state).preset,
            Preset::Create(CreatePreset::Comic)
        );
    }
}
