use thiserror::Error;

/// Main error type for the storefront
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Where a failure originated, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Remote,
    Validation,
    Local,
}

impl StorefrontError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StorefrontError::Transport(_) => ErrorCategory::Transport,
            StorefrontError::Api(_) | StorefrontError::NotFound(_) => ErrorCategory::Remote,
            StorefrontError::Validation(_) => ErrorCategory::Validation,
            StorefrontError::Config(_) | StorefrontError::Serialization(_) => {
                ErrorCategory::Local
            }
        }
    }

    /// Whether the user can sensibly try the same action again.
    ///
    /// Nothing in the crate retries on its own; this only drives the hint
    /// shown next to an error banner.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StorefrontError::Transport(_))
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            StorefrontError::Config(_) => "CONFIG_ERROR",
            StorefrontError::Transport(_) => "TRANSPORT_ERROR",
            StorefrontError::Api(_) => "API_ERROR",
            StorefrontError::Serialization(_) => "SERIALIZATION_ERROR",
            StorefrontError::Validation(_) => "VALIDATION_ERROR",
            StorefrontError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

impl From<reqwest::Error> for StorefrontError {
    fn from(err: reqwest::Error) -> Self {
        StorefrontError::Transport(err.to_string())
    }
}
