use thiserror::Error;

/// Failures surfaced by the cache, the remote source and the orchestrator.
///
/// Each variant maps to a distinct user-facing outcome at the HTTP boundary,
/// so callers should match on the kind rather than on the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    /// The upstream credential is missing. Raised before any request is sent.
    #[error("{0}")]
    Configuration(String),

    /// The upstream API answered with a non-success status.
    #[error("{message}")]
    RemoteSource { status: u16, message: String },

    #[error("Recipe {id} not found")]
    NotFound { id: i64 },

    /// Malformed caller input, rejected before any I/O.
    #[error("{0}")]
    Validation(String),

    /// The upstream API could not be reached or its body could not be decoded.
    #[error("Failed to reach the recipe API: {0}")]
    Transport(String),

    #[error("Unexpected response from the recipe API: {0}")]
    InvalidResponse(String),
}

impl RecipeError {
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self::Configuration(
            "Spoonacular API key not configured. Please set the SPOONACULAR_API_KEY environment variable."
                .to_string(),
        )
    }

    /// Build a `RemoteSource` error with the message shown to end users.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        let message = match status {
            401 => "Invalid API key. Please check your Spoonacular API key.".to_string(),
            402 => "API quota exceeded. Please check your Spoonacular plan.".to_string(),
            other => format!("API request failed: {other}"),
        };
        Self::RemoteSource { status, message }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
