//! Persona-styled narrative text produced by an external text-generation
//! service from processed region records.

pub mod client;
pub mod prompts;
mod service;

pub use client::{
    generate_text_or_fallback, GeminiClient, GenerationError, TextGenerator,
    EMPTY_RESPONSE_MESSAGE, MISSING_CREDENTIAL_MESSAGE, RATE_LIMITED_MESSAGE,
    TEMPORARILY_UNAVAILABLE_MESSAGE,
};
pub use service::{NarrativeService, NarrativeText};

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("{reason}")]
    InvalidInput { reason: &'static str },
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
