//! # API Errors
//!
//! Error types for calls against the timetable REST API.

use thiserror::Error;

/// Errors that can occur during API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// 401: missing, expired or rejected token.
    #[error("{}", .message.as_deref().unwrap_or("Your session has expired. Please sign in again."))]
    Unauthenticated { message: Option<String> },

    /// 403: signed in, but the role may not do this.
    #[error("{}", .message.as_deref().unwrap_or("You do not have permission to do that."))]
    Forbidden { message: Option<String> },

    /// Any other non-success status.
    #[error("{}", display_status(.status, .message.as_deref()))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-supplied `detail`/`message`, if any.
        message: Option<String>,
    },

    /// Network or transport failure (no response).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("invalid response format: {0}")]
    Decode(String),
}

fn display_status(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(msg) => msg.to_string(),
        None => format!("API Error: {status}"),
    }
}

impl ApiError {
    /// Classify a non-success status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_server_message(body);
        match status {
            401 => Self::Unauthenticated { message },
            403 => Self::Forbidden { message },
            _ => Self::Status { status, message },
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// The message the server sent, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { message }
            | Self::Forbidden { message }
            | Self::Status { message, .. } => message.as_deref(),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Pull a human-readable message out of an error body.
///
/// Understands FastAPI's `{"detail": "..."}` and validation
/// `{"detail": [{"msg": "..."}, ...]}` shapes, plus `{"message": "..."}`.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let message = match value.get("detail") {
        Some(serde_json::Value::String(detail)) => Some(detail.clone()),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    };

    message
        .or_else(|| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        assert_eq!(
            extract_server_message(r#"{"detail": "Course not found"}"#).as_deref(),
            Some("Course not found")
        );
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "name"], "msg": "field required", "type": "missing"}
        ]}"#;
        assert_eq!(
            extract_server_message(body).as_deref(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn test_message_field_and_garbage() {
        assert_eq!(
            extract_server_message(r#"{"message": "Room deleted"}"#).as_deref(),
            Some("Room deleted")
        );
        assert_eq!(extract_server_message("<html>502</html>"), None);
        assert_eq!(extract_server_message(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn test_status_classification() {
        let err = ApiError::from_status(401, r#"{"detail": "Invalid token"}"#);
        assert!(err.is_unauthenticated());
        assert_eq!(err.to_string(), "Invalid token");

        let err = ApiError::from_status(403, "");
        assert!(err.is_forbidden());
        assert_eq!(err.status(), Some(403));

        let err = ApiError::from_status(500, "oops");
        assert_eq!(err.to_string(), "API Error: 500");
        assert_eq!(err.server_message(), None);

        let err = ApiError::from_status(400, r#"{"detail": "Student already enrolled in another course. Withdraw first."}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "Student already enrolled in another course. Withdraw first."
        );
    }
}
