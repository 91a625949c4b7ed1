//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool and the token service. Handlers are otherwise
//! stateless: sessions live entirely inside signed tokens.

use std::sync::Arc;

use sqlx::PgPool;
use tokens::{TokenService, Ttl};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: Arc<TokenService>,
    /// Lifetime of tokens issued at login and registration.
    pub token_ttl: Ttl,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, tokens: TokenService, token_ttl: Ttl) -> Self {
        Self { pool, tokens: Arc::new(tokens), token_ttl }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
