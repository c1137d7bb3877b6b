// src/error.rs
use thiserror::Error;

/// Errors raised while wiring up the widget. Handlers never return these.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Required element '#{0}' is missing from the document")]
    MissingElement(&'static str),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failures of a single call against the chat backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server rejected request ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided detail text, if the backend sent any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_detail() {
        let err = ApiError::Rejected {
            status: 409,
            detail: Some("Email already used".to_string()),
        };
        assert!(err.is_rejection());
        assert_eq!(err.detail(), Some("Email already used"));
        assert_eq!(err.to_string(), "Server rejected request (409): Email already used");

        let err = ApiError::Decode("eof".to_string());
        assert!(!err.is_rejection());
        assert_eq!(err.detail(), None);
    }
}
