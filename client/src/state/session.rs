//! Client session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionContext` is created once in `App`, provided through Leptos context,
//! and shared by the auth bootstrap hook, the route guard, the login and
//! register pages, and the nav bar. It owns the only path that mutates
//! [`AuthState`].
//!
//! DESIGN
//! ======
//! Token storage and the verification endpoint sit behind small traits so the
//! store's transitions can be driven in tests without a browser. The
//! synchronous half of `verify_auth` (reading the token and entering the
//! loading state) runs at call time; only the network round trip is deferred
//! to the returned future. A guard that starts verification on mount is
//! therefore already `loading` on its first render and never redirects early.
//!
//! ERROR HANDLING
//! ==============
//! Verification failures of every kind end in the same place: token cleared,
//! state unauthenticated. Nothing is surfaced to the UI; guards redirect.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api::{self, VerifyFailure};
use crate::net::types::{AuthResponse, User};
use crate::state::auth::{AuthState, VerifyOutcome, VerifyStart};
use crate::util::auth::should_bootstrap;
use crate::util::storage::LocalTokenStorage;

/// Durable home of the session token.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Server calls the session store depends on.
#[allow(async_fn_in_trait)]
pub trait SessionApi {
    /// Exchange a token for the user it names.
    async fn verify(&self, token: &str) -> Result<User, VerifyFailure>;
    /// Best-effort server notification; failures are ignored.
    async fn logout(&self, token: &str);
}

/// [`SessionApi`] over the REST endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpSessionApi;

impl SessionApi for HttpSessionApi {
    async fn verify(&self, token: &str) -> Result<User, VerifyFailure> {
        api::verify_session(token).await
    }

    async fn logout(&self, token: &str) {
        api::logout(token).await;
    }
}

/// Session state plus the collaborators needed to change it.
pub struct SessionContext<S, A> {
    pub state: RwSignal<AuthState>,
    storage: Arc<S>,
    api: Arc<A>,
}

impl<S, A> Clone for SessionContext<S, A> {
    fn clone(&self) -> Self {
        Self { state: self.state, storage: Arc::clone(&self.storage), api: Arc::clone(&self.api) }
    }
}

/// The session used by the running app.
pub type BrowserSession = SessionContext<LocalTokenStorage, HttpSessionApi>;

impl BrowserSession {
    #[must_use]
    pub fn browser() -> Self {
        Self::new(LocalTokenStorage, HttpSessionApi)
    }
}

impl<S, A> SessionContext<S, A>
where
    S: TokenStorage + 'static,
    A: SessionApi + 'static,
{
    pub fn new(storage: S, api: A) -> Self {
        Self { state: RwSignal::new(AuthState::default()), storage: Arc::new(storage), api: Arc::new(api) }
    }

    /// Whether a persisted token exists right now.
    pub fn has_token(&self) -> bool {
        self.storage.load().is_some()
    }

    /// The persisted token, for authenticated requests.
    pub fn token(&self) -> Option<String> {
        self.storage.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(AuthState::is_authenticated)
    }

    /// Verify the persisted token with the server.
    ///
    /// State changes to `loading` (or straight to unauthenticated when no
    /// token exists) before this returns. The returned future performs the
    /// request; it resolves immediately when no request is needed, including
    /// when an identical request is already in flight.
    pub fn verify_auth(&self) -> impl Future<Output = ()> + use<S, A> {
        let token = self.storage.load();
        let start = self.state.try_update(|state| state.begin_verify(token.as_deref()));
        let request = match (start, token) {
            (Some(VerifyStart::Started(generation)), Some(token)) => Some((generation, token)),
            _ => None,
        };
        let session = self.clone();
        async move {
            if let Some((generation, token)) = request {
                session.complete_verify(generation, token).await;
            }
        }
    }

    async fn complete_verify(&self, generation: u64, token: String) {
        let result = self.api.verify(&token).await;
        #[cfg(feature = "csr")]
        {
            if let Err(e) = &result {
                log::info!("session token not accepted: {e}");
            }
        }
        let outcome = self.state.try_update(|state| state.finish_verify(generation, result));
        // Only drop the token that failed; a newer one may have been written meanwhile.
        if outcome == Some(VerifyOutcome::Rejected) && self.storage.load().as_deref() == Some(token.as_str()) {
            self.storage.clear();
        }
    }

    /// App-start hydration: a verification future when a persisted token
    /// exists and no session is active, otherwise `None`.
    pub fn bootstrap(&self) -> Option<impl Future<Output = ()> + use<S, A>> {
        should_bootstrap(self.is_authenticated(), self.has_token()).then(|| self.verify_auth())
    }

    /// Persist a freshly issued token and mark the user signed in.
    pub fn login(&self, response: AuthResponse) {
        self.storage.store(&response.token);
        self.state.update(|state| state.signed_in(response.user));
    }

    /// Drop the token and sign out locally. The returned future notifies the
    /// server and may be ignored.
    pub fn logout(&self) -> impl Future<Output = ()> + use<S, A> {
        let token = self.storage.load();
        self.storage.clear();
        self.state.update(AuthState::signed_out);
        let api = Arc::clone(&self.api);
        async move {
            if let Some(token) = token {
                api.logout(&token).await;
            }
        }
    }
}

/// Hydrate the session from a persisted token once, at application start.
/// Safe to combine with guards that also verify on mount.
pub fn use_auth_bootstrap(session: &BrowserSession) {
    if let Some(task) = session.bootstrap() {
        leptos::task::spawn_local(task);
    }
}
