//! Persisted session token in `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is best-effort browser-only behavior: a missing window or
//! blocked storage reads as "no token", and native builds always no-op.

use crate::state::session::TokenStorage;

/// `localStorage` key holding the session token.
pub const AUTH_TOKEN_KEY: &str = "auth-token";

/// [`TokenStorage`] backed by the browser's `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalTokenStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStorage for LocalTokenStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(AUTH_TOKEN_KEY)
                .ok()
                .flatten()
                .filter(|token| !token.trim().is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn store(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(AUTH_TOKEN_KEY, token);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(AUTH_TOKEN_KEY);
            }
        }
    }
}
