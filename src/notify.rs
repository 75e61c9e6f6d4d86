//! Toast notifications and what to do with a failed request.

use std::collections::VecDeque;

use crate::api::ApiError;
use crate::validation::ValidationError;

/// Toasts visible at once; older ones are dropped first.
pub const TOAST_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// Queue of visible toasts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        variant: ToastVariant,
    ) -> u64 {
        self.next_id += 1;
        self.items.push_back(Toast {
            id: self.next_id,
            title: title.into(),
            description: description.into(),
            variant,
        });
        while self.items.len() > TOAST_LIMIT {
            self.items.pop_front();
        }
        self.next_id
    }

    pub fn info(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(title, description, ToastVariant::Default)
    }

    pub fn success(&mut self, description: impl Into<String>) -> u64 {
        self.push("Success", description, ToastVariant::Success)
    }

    pub fn error(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(title, description, ToastVariant::Destructive)
    }

    pub fn invalid(&mut self, err: &ValidationError) -> u64 {
        self.error(err.title, err.message.clone())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome for a failed API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Session is gone: clear it and go to sign-in, returning afterwards.
    SignIn,
    /// Signed in but not allowed: show the forbidden page.
    Forbidden,
    /// Anything else: a destructive toast.
    Notify { title: String, description: String },
}

impl ErrorDisposition {
    /// Classify `err`. `fallback` describes the failed action and is shown
    /// when the server sent no message of its own.
    pub fn for_error(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthenticated { .. } => Self::SignIn,
            ApiError::Forbidden { .. } => Self::Forbidden,
            ApiError::Network(_) => Self::Notify {
                title: "Network Error".to_string(),
                description: format!("{fallback}. Check your connection and try again."),
            },
            _ => Self::Notify {
                title: "Error".to_string(),
                description: err.server_message().unwrap_or(fallback).to_string(),
            },
        }
    }

    /// Like [`for_error`](Self::for_error), for requests that re-check a
    /// password. A 401 whose reason names the password rejects the password,
    /// not the session; token failures still go to sign-in.
    pub fn for_password_check(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthenticated { message: Some(message) }
                if message.to_lowercase().contains("password") =>
            {
                Self::Notify {
                    title: "Error".to_string(),
                    description: message.clone(),
                }
            }
            _ => Self::for_error(err, fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_drops_oldest() {
        let mut toasts = Toasts::default();
        let first = toasts.info("One", "");
        toasts.info("Two", "");
        toasts.info("Three", "");
        toasts.info("Four", "");
        assert_eq!(toasts.len(), TOAST_LIMIT);
        assert!(toasts.iter().all(|t| t.id != first));
        assert_eq!(toasts.iter().last().map(|t| t.title.as_str()), Some("Four"));
    }

    #[test]
    fn test_dismiss() {
        let mut toasts = Toasts::default();
        let id = toasts.success("Room created");
        toasts.error("Error", "nope");
        toasts.dismiss(id);
        assert_eq!(toasts.len(), 1);
        assert_eq!(
            toasts.iter().next().map(|t| t.variant),
            Some(ToastVariant::Destructive)
        );
    }

    #[test]
    fn test_validation_toast() {
        let mut toasts = Toasts::default();
        toasts.invalid(&ValidationError::new("Weak Password", "too short"));
        let toast = toasts.iter().next().unwrap();
        assert_eq!(toast.title, "Weak Password");
        assert_eq!(toast.description, "too short");
        assert_eq!(toast.variant, ToastVariant::Destructive);
    }

    #[test]
    fn test_disposition() {
        assert_eq!(
            ErrorDisposition::for_error(&ApiError::from_status(401, ""), "Failed"),
            ErrorDisposition::SignIn
        );
        assert_eq!(
            ErrorDisposition::for_error(&ApiError::from_status(403, ""), "Failed"),
            ErrorDisposition::Forbidden
        );
        assert_eq!(
            ErrorDisposition::for_error(
                &ApiError::from_status(400, r#"{"detail": "Unit code already exists"}"#),
                "Failed to add unit"
            ),
            ErrorDisposition::Notify {
                title: "Error".into(),
                description: "Unit code already exists".into()
            }
        );
        assert_eq!(
            ErrorDisposition::for_error(&ApiError::from_status(500, "oops"), "Failed to add unit"),
            ErrorDisposition::Notify {
                title: "Error".into(),
                description: "Failed to add unit".into()
            }
        );
    }

    #[test]
    fn test_wrong_current_password_keeps_session() {
        let rejected = ApiError::from_status(401, r#"{"detail": "Current password is incorrect"}"#);
        assert_eq!(
            ErrorDisposition::for_password_check(&rejected, "Failed to change password"),
            ErrorDisposition::Notify {
                title: "Error".into(),
                description: "Current password is incorrect".into()
            }
        );
        // Token failures still mean the session is gone
        assert_eq!(
            ErrorDisposition::for_password_check(&ApiError::from_status(401, ""), "Failed"),
            ErrorDisposition::SignIn
        );
        let bad_header = ApiError::from_status(401, r#"{"detail": "Invalid authorization header"}"#);
        assert_eq!(
            ErrorDisposition::for_password_check(&bad_header, "Failed"),
            ErrorDisposition::SignIn
        );
        assert_eq!(
            ErrorDisposition::for_password_check(&ApiError::from_status(403, ""), "Failed"),
            ErrorDisposition::Forbidden
        );
    }
}
