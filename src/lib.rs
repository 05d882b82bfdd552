//! Francolino AI Studio - prompt-driven image creation and editing
//!
//! Builds prompts from per-mode presets, attaches uploaded images, and asks a
//! Gemini image model for a single square image that can be saved to disk.

pub mod ai;
pub mod download;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod request;
pub mod state;
pub mod studio;

pub use error::{Error, Result};
