//! Session lifecycle: restore, login, token adoption and logout.
//!
//! These are plain async functions over an [`ApiClient`]; the Dioxus
//! [`AppState`](crate::app::state::AppState) handle drives them and owns
//! the reactive [`SessionState`].

use timetable_types::user::{GoogleSignInRequest, LoginRequest};
use timetable_types::{Role, User};

use super::token::decode_claims;
use crate::api::{ApiClient, ApiError, ApiResult};

/// Who is signed in, and whether that is still being worked out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    /// True while a persisted token is being exchanged for a user
    pub loading: bool,
}

impl SessionState {
    /// Initial state: loading only if there is a token to check.
    pub fn initial(has_token: bool) -> Self {
        Self {
            user: None,
            loading: has_token,
        }
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// Exchange a persisted token for the current user.
///
/// Returns `None` when there is no token or the backend rejects it; a
/// rejected token is cleared.
pub async fn restore(api: &ApiClient) -> Option<User> {
    if !api.has_token() {
        return None;
    }
    match api.me().await {
        Ok(user) => {
            tracing::info!(email = %user.email, role = %user.role, "Session restored");
            Some(user)
        }
        Err(e) => {
            tracing::warn!("Stored token rejected, clearing session: {}", e);
            api.clear_token();
            None
        }
    }
}

/// Sign in with email, password and the portal's role.
pub async fn login(api: &ApiClient, email: &str, password: &str, role: Role) -> ApiResult<User> {
    let resp = api
        .login(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            role,
        })
        .await?;
    let user = adopt_token(api, &resp.access_token, resp.user).await?;
    tracing::info!(email = %user.email, role = %user.role, "Signed in");
    Ok(user)
}

/// Exchange a Google Identity Services credential for a session.
pub async fn google_sign_in(api: &ApiClient, credential: &str, role: Role) -> ApiResult<User> {
    let resp = api
        .google_sign_in(&GoogleSignInRequest {
            token: credential.to_string(),
            role,
        })
        .await?;
    let user = adopt_token(api, &resp.access_token, resp.user).await?;
    tracing::info!(email = %user.email, role = %user.role, "Signed in with Google");
    Ok(user)
}

/// Store `token` and resolve the user it belongs to.
///
/// Uses `user` when the backend already sent one, otherwise asks `/auth/me`,
/// otherwise falls back to the `email`/`role` claims in the token payload.
pub async fn adopt_token(api: &ApiClient, token: &str, user: Option<User>) -> ApiResult<User> {
    if token.trim().is_empty() {
        return Err(ApiError::Decode("No token received".to_string()));
    }
    api.set_token(token);

    if let Some(user) = user {
        return Ok(user);
    }

    match api.me().await {
        Ok(user) => Ok(user),
        Err(e) => match decode_claims(token).and_then(|c| c.to_user()) {
            Some(user) => {
                tracing::debug!("Using token claims for user after /auth/me failed: {}", e);
                Ok(user)
            }
            None => {
                api.clear_token();
                Err(e)
            }
        },
    }
}

/// Forget the token.
pub fn logout(api: &ApiClient) {
    api.clear_token();
    tracing::info!("Signed out");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert!(SessionState::initial(true).loading);
        assert!(!SessionState::initial(false).loading);
        assert!(!SessionState::initial(true).is_authenticated());
    }

    #[test]
    fn test_signed_in_state() {
        let state = SessionState::signed_in(User::from_claims("a@uni.ac.ke", Role::Admin));
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Admin));
        assert!(!state.loading);
        assert_eq!(SessionState::signed_out().role(), None);
    }

    #[test]
    fn test_module_doc_names_session_owner() {
        let doc: String = include_str!("session.rs")
            .lines()
            .take_while(|line| line.starts_with("//!"))
            .collect();
        assert!(doc.contains("crate::app::state::AppState"));
    }
}
