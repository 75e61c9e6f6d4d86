//! Bearer token persistence.
//!
//! The token is the only client state that outlives a page load. In the
//! browser it lives in `localStorage` under [`TOKEN_KEY`]; server-side
//! rendering and tests use the in-memory store.

use std::sync::Mutex;

/// `localStorage` key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Where the bearer token lives between requests.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Token held in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// Token held in the browser's `localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()
                .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
                .filter(|t| !t.is_empty())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn set(&self, token: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    tracing::warn!("Failed to persist auth token");
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// The store appropriate for the current target.
pub fn default_store() -> std::sync::Arc<dyn TokenStore> {
    if cfg!(target_arch = "wasm32") {
        std::sync::Arc::new(LocalStorageTokenStore)
    } else {
        std::sync::Arc::new(MemoryTokenStore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.get(), None);
        store.set("abc");
        assert_eq!(store.get().as_deref(), Some("abc"));
        store.set("def");
        assert_eq!(store.get().as_deref(), Some("def"));
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_with_token() {
        let store = MemoryTokenStore::with_token("seed");
        assert_eq!(store.get().as_deref(), Some("seed"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_local_storage_is_inert_off_browser() {
        let store = LocalStorageTokenStore;
        store.set("abc");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_token_is_the_only_persisted_state() {
        let shell = [
            include_str!("../app/mod.rs"),
            include_str!("../app/components/layout.rs"),
            include_str!("../app/components/sidebar.rs"),
            include_str!("../app/pages/account.rs"),
        ];
        for source in shell {
            assert!(!source.contains("localStorage"));
            assert!(!source.contains("local_storage"));
        }
    }
}
