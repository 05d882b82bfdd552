//! Studio state and the reducer that drives it
//!
//! All state changes go through [`reduce`]: the current state plus an
//! [`Action`] yields the next state.

use crate::image::{GeneratedImage, InlineImage};
use crate::models::{CreatePreset, EditPreset, Mode, Preset};

/// Identifier issued for each generation, increasing monotonically.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    /// Single-image edits and the first compose image.
    Primary,
    /// Second compose image.
    Secondary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub mode: Mode,
    pub create_preset: CreatePreset,
    pub edit_preset: EditPreset,
    pub prompt: String,
    pub primary_image: Option<InlineImage>,
    pub secondary_image: Option<InlineImage>,
    pub is_generating: bool,
    pub result: Option<GeneratedImage>,
    pub show_modal: bool,
    /// Request whose completion will be accepted.
    pub in_flight: Option<RequestId>,
    pub last_request_id: RequestId,
}

impl AppState {
    pub fn active_preset(&self) -> Preset {
        match self.mode {
            Mode::Create => Preset::Create(self.create_preset),
            Mode::Edit => Preset::Edit(self.edit_preset),
        }
    }

    pub fn is_compose(&self) -> bool {
        self.active_preset().is_compose()
    }

    /// Whether a completion tagged `id` would be accepted.
    pub fn accepts(&self, id: RequestId) -> bool {
        self.in_flight == Some(id)
    }

    /// Whether an image in `slot` is attached to requests built from this
    /// state.
    pub fn slot_feeds_request(&self, slot: ImageSlot) -> bool {
        match slot {
            ImageSlot::Primary => self.mode == Mode::Edit,
            ImageSlot::Secondary => self.is_compose() && self.primary_image.is_some(),
        }
    }

    fn abandon_in_flight(&mut self) {
        if let Some(id) = self.in_flight.take() {
            tracing::debug!("Abandoning in-flight request {}", id);
            self.is_generating = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetMode(Mode),
    SetCreatePreset(CreatePreset),
    SetEditPreset(EditPreset),
    /// Leave the compose view and return to the single-image edit presets.
    BackToEditPresets,
    SetPrompt(String),
    SetImage { slot: ImageSlot, image: InlineImage },
    ClearImage(ImageSlot),
    /// Issue the next request id and mark it in flight.
    GenerationRequested,
    GenerationSucceeded { id: RequestId, image: GeneratedImage },
    GenerationFailed { id: RequestId },
    /// Continue editing from the current result.
    EditResult,
    ShowModal(bool),
    DismissResult,
}

pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::SetMode(mode) => {
            if state.mode != mode {
                state.abandon_in_flight();
            }
            state.mode = mode;
        }
        Action::SetCreatePreset(preset) => {
            if state.create_preset != preset {
                state.abandon_in_flight();
            }
            state.create_preset = preset;
        }
        Action::SetEditPreset(preset) => {
            if state.edit_preset != preset {
                state.abandon_in_flight();
            }
            state.edit_preset = preset;
        }
        Action::BackToEditPresets => {
            if state.edit_preset != EditPreset::AddRemove {
                state.abandon_in_flight();
            }
            state.edit_preset = EditPreset::AddRemove;
        }
        Action::SetPrompt(prompt) => state.prompt = prompt,
        Action::SetImage { slot, image } => {
            if state.slot_feeds_request(slot) {
                state.abandon_in_flight();
            }
            match slot {
                ImageSlot::Primary => state.primary_image = Some(image),
                ImageSlot::Secondary => state.secondary_image = Some(image),
            }
        }
        Action::ClearImage(slot) => {
            if state.slot_feeds_request(slot) {
                state.abandon_in_flight();
            }
            match slot {
                ImageSlot::Primary => state.primary_image = None,
                ImageSlot::Secondary => state.secondary_image = None,
            }
        }
        Action::GenerationRequested => {
            state.last_request_id += 1;
            state.in_flight = Some(state.last_request_id);
            state.is_generating = true;
            state.result = None;
        }
        Action::GenerationSucceeded { id, image } => {
            if state.accepts(id) {
                state.in_flight = None;
                state.is_generating = false;
                state.result = Some(image);
            } else {
                tracing::warn!(
                    "Discarding result of request {} (in flight: {:?})",
                    id,
                    state.in_flight
                );
            }
        }
        Action::GenerationFailed { id } => {
            if state.accepts(id) {
                state.in_flight = None;
                state.is_generating = false;
            }
        }
        Action::EditResult => {
            if let Some(result) = state.result.take() {
                state.mode = Mode::Edit;
                state.primary_image = Some(result.into());
            }
        }
        Action::ShowModal(show) => state.show_modal = show,
        Action::DismissResult => {
            state.result = None;
            state.show_modal = false;
        }
    }
    state
}
