//! Error types for loading quiz slides.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching or parsing a slide document.
///
/// None of these reach a presentation layer: [`crate::Loader::load`]
/// replaces any of them with the fallback dataset.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the question document from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The remote source could not be reached or answered with an error status.
    #[error("Failed to fetch question document: {0}")]
    Fetch(String),

    /// The remote source did not answer within the configured deadline.
    #[error("Timed out fetching question document")]
    Timeout,

    /// The body was not JSON or did not match the slide schema.
    #[error("Invalid question document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A question failed validation.
    #[error("Invalid question {id} on page {page}: {reason}")]
    InvalidQuestion {
        page: u32,
        id: String,
        reason: String,
    },

    /// Every slide in the document had an empty question list.
    #[error("Question document contains no questions")]
    NoQuestions,
}
