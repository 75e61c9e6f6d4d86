//! Authentication: token storage, session lifecycle and route guards.

pub mod guard;
pub mod session;
pub mod storage;
pub mod token;

pub use guard::{authorize, dashboard_path, post_login_target, GuardDecision};
pub use session::SessionState;
pub use storage::{default_store, LocalStorageTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
