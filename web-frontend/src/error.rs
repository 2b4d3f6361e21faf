//! Failures talking to the REST API, grouped the way pages react to them.

use thiserror::Error;

/// How a page should present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network error or unexpected status: transient banner, state unchanged.
    FetchFailed,
    /// The API refused the submitted data: inline messages.
    ValidationFailed,
    /// The record does not exist: dedicated not-found page.
    NotFound,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authorized")]
    Unauthorized,

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("API responded with status {status}")]
    Upstream { status: u16 },

    #[error("Failed to reach API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected API response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::NotFound(_) => ErrorCategory::NotFound,
            ApiError::Rejected { .. } => ErrorCategory::ValidationFailed,
            ApiError::Unauthorized
            | ApiError::Upstream { .. }
            | ApiError::Transport(_)
            | ApiError::Decode(_) => ErrorCategory::FetchFailed,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    /// Short text suitable for a banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound(_) => "The requested record could not be found.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Upstream { .. } | ApiError::Decode(_) => {
                "The server could not complete the request. Please try again.".to_string()
            }
            ApiError::Transport(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_status_classes() {
        assert_eq!(
            ApiError::NotFound("/api/blogs/x".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            ApiError::Rejected {
                status: 422,
                message: "Email taken".into()
            }
            .category(),
            ErrorCategory::ValidationFailed
        );
        assert_eq!(
            ApiError::Upstream { status: 502 }.category(),
            ErrorCategory::FetchFailed
        );
    }

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let err = ApiError::Rejected {
            status: 400,
            message: "Due date is required".into(),
        };
        assert_eq!(err.user_message(), "Due date is required");
    }
}
