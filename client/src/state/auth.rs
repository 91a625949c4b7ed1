//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and user-aware components to coordinate login
//! redirects and identity-dependent rendering.
//!
//! DESIGN
//! ======
//! Every verification request is tagged with a generation. A response is
//! applied only if its generation is still the one in flight, so a slow
//! response for an old token can never overwrite a newer login, logout, or
//! verification. Requests for the token already in flight are coalesced.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::VerifyFailure;
use crate::net::types::User;

/// Coarse session status, derived from [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    /// Nothing has been verified yet this page load.
    Unknown,
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct InFlight {
    generation: u64,
    token: String,
}

/// What [`AuthState::begin_verify`] decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyStart {
    /// No persisted token; state is now unauthenticated, no request needed.
    NoToken,
    /// A request for this exact token is already in flight.
    Coalesced,
    /// Caller must send a request and report back with this generation.
    Started(u64),
}

/// What [`AuthState::finish_verify`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// A newer request, login, or logout superseded this one; nothing changed.
    Stale,
    Authenticated,
    /// The token is unusable and should be removed from storage.
    Rejected,
}

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    /// Set once any verification, login, or logout has settled.
    pub checked: bool,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.loading {
            AuthPhase::Loading
        } else if self.user.is_some() {
            AuthPhase::Authenticated
        } else if self.checked {
            AuthPhase::Unauthenticated
        } else {
            AuthPhase::Unknown
        }
    }

    /// Generation of the most recent state-changing action.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start verifying `token` (the currently persisted one, if any).
    pub fn begin_verify(&mut self, token: Option<&str>) -> VerifyStart {
        let Some(token) = token else {
            self.settle(None);
            return VerifyStart::NoToken;
        };
        if self.in_flight.as_ref().is_some_and(|f| f.token == token) {
            return VerifyStart::Coalesced;
        }
        self.generation += 1;
        self.in_flight = Some(InFlight { generation: self.generation, token: token.to_owned() });
        self.loading = true;
        VerifyStart::Started(self.generation)
    }

    /// Apply the server's answer for the request tagged `generation`.
    pub fn finish_verify(&mut self, generation: u64, result: Result<User, VerifyFailure>) -> VerifyOutcome {
        if self.in_flight.as_ref().map(|f| f.generation) != Some(generation) {
            return VerifyOutcome::Stale;
        }
        match result {
            Ok(user) => {
                self.settle(Some(user));
                VerifyOutcome::Authenticated
            }
            Err(_) => {
                self.settle(None);
                VerifyOutcome::Rejected
            }
        }
    }

    /// A fresh token was obtained from login or registration.
    pub fn signed_in(&mut self, user: User) {
        self.settle(Some(user));
    }

    pub fn signed_out(&mut self) {
        self.settle(None);
    }

    fn settle(&mut self, user: Option<User>) {
        self.generation += 1;
        self.in_flight = None;
        self.user = user;
        self.loading = false;
        self.checked = true;
    }
}
