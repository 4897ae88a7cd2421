//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::assembly::AssemblyError;
use quiz_core::ingest::IngestError;
use quiz_core::model::{Difficulty, SessionResultError};
use storage::LoadError;

/// Errors emitted by `QuestionGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("question generator is not configured")]
    Disabled,
    #[error("question generator returned an empty response")]
    EmptyResponse,
    #[error("question generator request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("question generator returned malformed JSON: {0}")]
    Payload(String),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Errors emitted by quiz session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for difficulty {0}")]
    NoQuestionsForDifficulty(Difficulty),
    #[error("session already completed")]
    Completed,
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Result(#[from] SessionResultError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
