//! Error types for the `train_cli` demo.
//!
//! Parse failures never reach this type: `parse_all` reports them and exits.
//! What remains is option definition, settings extraction, and output.

use thiserror::Error;

/// Errors raised by the train demo.
#[derive(Debug, Error)]
pub enum TrainError {
    /// An option definition was rejected.
    #[error("invalid option definition: {0}")]
    Definition(#[from] optmatch::DefinitionError),
    /// Bound values did not fit the settings struct.
    #[error("invalid settings: {0}")]
    Settings(#[from] Box<figment::Error>),
    /// Writing the summary failed.
    #[error("failed to write summary: {0}")]
    Output(#[from] std::io::Error),
    /// Serializing the summary failed.
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for the train demo.
pub type Result<T> = std::result::Result<T, TrainError>;
