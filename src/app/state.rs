//! # Application State
//!
//! Global state shared through Dioxus context. Every field is a signal, so
//! [`AppState`] is `Copy` and can be moved into event handlers and spawned
//! tasks freely.
//!
//! ```rust,ignore
//! #[component]
//! fn Rooms() -> Element {
//!     let state = use_app();
//!     let rooms = use_rooms();
//!     // ...
//! }
//! ```

use std::future::Future;

use dioxus::prelude::*;
use timetable_types::User;

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::auth::{default_store, session, SessionState};
use crate::config::ClientConfig;
use crate::notify::{ErrorDisposition, Toasts};
use crate::query::{Mutation, QueryCache, QueryKey};
use crate::validation::ValidationError;

/// Reactive wrapper around [`QueryCache`].
///
/// Queries read `epoch` to subscribe; an invalidation bumps it, every
/// mounted query re-runs, and those whose entries survived answer from
/// the cache without a request.
#[derive(Clone, Copy)]
pub struct QueryClient {
    epoch: Signal<u64>,
    cache: Signal<QueryCache>,
}

impl QueryClient {
    fn new() -> Self {
        Self {
            epoch: Signal::new(0),
            cache: Signal::new(QueryCache::new()),
        }
    }

    /// Subscribe the current reactive scope to invalidations.
    pub fn subscribe(&self) -> u64 {
        *self.epoch.read()
    }

    pub fn cached<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.cache.peek().get(key)
    }

    pub fn begin(self, key: &QueryKey) -> u64 {
        let mut cache = self.cache;
        let generation = cache.write().begin(key);
        generation
    }

    pub fn store<T: 'static>(self, key: QueryKey, generation: u64, value: T) {
        let mut cache = self.cache;
        cache.write().insert_if_current(key, generation, value);
    }

    pub fn invalidate(self, mutation: Mutation) {
        let mut cache = self.cache;
        let dropped = cache.write().invalidate_for(mutation);
        tracing::debug!(?mutation, dropped, "Invalidated queries");
        self.bump();
    }

    pub fn clear(self) {
        let mut cache = self.cache;
        cache.write().clear();
        self.bump();
    }

    fn bump(self) {
        let mut epoch = self.epoch;
        epoch += 1;
    }
}

/// Global application state.
#[derive(Clone, Copy)]
pub struct AppState {
    api: Signal<ApiClient>,

    /// Build-time client settings.
    pub config: Signal<ClientConfig>,

    /// Who is signed in.
    pub session: Signal<SessionState>,

    /// Set when the backend answers 403; the route guard turns it into a
    /// redirect to the forbidden page.
    pub denied: Signal<bool>,

    pub toasts: Signal<Toasts>,

    pub queries: QueryClient,
}

impl AppState {
    /// Create the state from the build-time configuration.
    ///
    /// The session starts out loading; [`AppState::restore_session`] settles it.
    #[must_use]
    pub fn new() -> Self {
        let config = ClientConfig::from_build_env();
        let api = ApiClient::new(config.api_url.clone(), default_store());
        Self {
            api: Signal::new(api),
            config: Signal::new(config),
            session: Signal::new(SessionState::initial(true)),
            denied: Signal::new(false),
            toasts: Signal::new(Toasts::default()),
            queries: QueryClient::new(),
        }
    }

    /// A client for the configured API.
    #[must_use]
    pub fn api(&self) -> ApiClient {
        self.api.peek().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user.clone()
    }

    /// Exchange a stored token for the current user, once on startup.
    pub async fn restore_session(self) {
        let api = self.api();
        let user = session::restore(&api).await;
        let mut session = self.session;
        session.set(match user {
            Some(user) => SessionState::signed_in(user),
            None => SessionState::signed_out(),
        });
    }

    pub fn signed_in(self, user: User) {
        let mut session = self.session;
        session.set(SessionState::signed_in(user));
    }

    /// Forget the token, the user and every cached response.
    pub fn sign_out(self) {
        session::logout(&self.api());
        let mut session = self.session;
        session.set(SessionState::signed_out());
        self.queries.clear();
    }

    // ==================== Notifications ====================

    pub fn info(self, title: impl Into<String>, description: impl Into<String>) {
        let mut toasts = self.toasts;
        toasts.write().info(title, description);
    }

    pub fn success(self, description: impl Into<String>) {
        let mut toasts = self.toasts;
        toasts.write().success(description);
    }

    pub fn error(self, title: impl Into<String>, description: impl Into<String>) {
        let mut toasts = self.toasts;
        toasts.write().error(title, description);
    }

    pub fn invalid(self, err: &ValidationError) {
        let mut toasts = self.toasts;
        toasts.write().invalid(err);
    }

    /// Route a failed request to sign-in, the forbidden page, or a toast.
    pub fn report(self, err: &ApiError, fallback: &str) {
        self.dispose(err, ErrorDisposition::for_error(err, fallback));
    }

    fn dispose(self, err: &ApiError, disposition: ErrorDisposition) {
        match disposition {
            ErrorDisposition::SignIn => {
                tracing::warn!("Session rejected by API, signing out");
                self.sign_out();
                self.error("Session Expired", err.to_string());
            }
            ErrorDisposition::Forbidden => {
                let mut denied = self.denied;
                denied.set(true);
            }
            ErrorDisposition::Notify { title, description } => self.error(title, description),
        }
    }

    /// Run a write, invalidate what it makes stale, and report a failure.
    ///
    /// Returns `None` when the request failed (the failure has already been
    /// shown to the user).
    pub async fn mutate<T, F, Fut>(self, mutation: Mutation, fallback: &str, run: F) -> Option<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        match run(self.api()).await {
            Ok(value) => {
                self.queries.invalidate(mutation);
                Some(value)
            }
            Err(e) => {
                tracing::warn!(?mutation, "Request failed: {}", e);
                self.report(&e, fallback);
                None
            }
        }
    }

    /// Run a request that does not touch cached data.
    pub async fn call<T, F, Fut>(self, fallback: &str, run: F) -> Option<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        match run(self.api()).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(&e, fallback);
                None
            }
        }
    }

    /// [`call`](Self::call) for a request that re-checks the user's password,
    /// where a 401 can mean a wrong password rather than a lost session.
    pub async fn call_with_password<T, F, Fut>(self, fallback: &str, run: F) -> Option<T>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        match run(self.api()).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.dispose(&e, ErrorDisposition::for_password_check(&e, fallback));
                None
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// The [`AppState`] provided at the root.
pub fn use_app() -> AppState {
    use_context::<AppState>()
}
