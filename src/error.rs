//! Error handling and custom error types
//!
//! Provides unified error handling across the studio using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Input decode error: {0}")]
    InputDecode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("A generation is already in progress")]
    GenerationInProgress,

    #[error("Generation result for request {0} was superseded")]
    Superseded(u64),

    #[error("No generated image to download")]
    NothingToDownload,

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    /// Short message suitable for showing to the user.
    ///
    /// Remote failures collapse into one generic message; the details stay in
    /// the logs.
    pub fn notification(&self) -> &'static str {
        match self {
            Error::Validation(_) => "Please type your idea in the prompt.",
            Error::InputDecode(_) => "The selected file could not be read as an image.",
            Error::GenerationInProgress => "An image is already being generated.",
            Error::Superseded(_) => "The previous request was replaced by a newer one.",
            Error::NothingToDownload => "There is no generated image to save yet.",
            Error::Config(_) => "The studio is not configured correctly.",
            Error::Io(_) => "Could not save or read the file.",
            Error::Http(_) | Error::AiProvider(_) | Error::Invariant(_) => {
                "Failed to generate the image. Check your connection."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
