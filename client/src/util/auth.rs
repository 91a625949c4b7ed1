//! Route-guard policy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `RouteGuard` component and the auth bootstrap hook both ask the same
//! questions: should a verification start, and what should this route show.
//! The answers live here as plain functions so they can be tested without a
//! browser or a reactive runtime.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Role;
use crate::state::auth::AuthState;

/// Path of the sign-in surface.
pub const LOGIN_PATH: &str = "/login";

/// Landing path when no usable return location exists.
pub const DEFAULT_RETURN_PATH: &str = "/";

/// What a guarded route should do for the current auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Verification pending; show a placeholder and decide later.
    Loading,
    /// Not signed in on a protected route. Holds the login URL.
    RedirectToLogin(String),
    /// Signed in on an auth-only route (login, register). Holds the target.
    RedirectAway(String),
    Render,
}

/// Decide what a guarded route shows.
///
/// `origin` is the requested path plus query. `redirect_param` is the
/// `redirect` query value, used when bouncing a signed-in user off an
/// auth-only page.
#[must_use]
pub fn guard_decision(state: &AuthState, require_auth: bool, origin: &str, redirect_param: Option<&str>) -> GuardDecision {
    if state.loading {
        return GuardDecision::Loading;
    }
    let authenticated = state.is_authenticated();
    if require_auth && !authenticated {
        return GuardDecision::RedirectToLogin(login_redirect_url(origin));
    }
    if !require_auth && authenticated {
        return GuardDecision::RedirectAway(safe_redirect_target(redirect_param));
    }
    GuardDecision::Render
}

/// Whether a guard should start `verify_auth` when it mounts.
///
/// Without a token on a protected route, verification settles immediately as
/// unauthenticated so the redirect happens without a network call. With a
/// token that has not produced a session yet, verification hydrates state.
#[must_use]
pub fn should_verify_on_mount(has_token: bool, require_auth: bool, authenticated: bool) -> bool {
    (!has_token && require_auth) || (has_token && !authenticated)
}

/// Whether the app-start hook should start `verify_auth`.
#[must_use]
pub fn should_bootstrap(authenticated: bool, has_token: bool) -> bool {
    !authenticated && has_token
}

/// Whether the signed-in user may see content requiring `required`.
#[must_use]
pub fn role_allows(state: &AuthState, required: Role) -> bool {
    state.user.as_ref().is_some_and(|user| user.role.grants(required))
}

/// `/login?redirect=<origin>`, or bare `/login` when the origin is not worth
/// returning to.
#[must_use]
pub fn login_redirect_url(origin: &str) -> String {
    if !is_safe_local_path(origin) || origin == DEFAULT_RETURN_PATH || is_login_path(origin) {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?redirect={}", urlencoding::encode(origin))
}

/// Where to send a signed-in user leaving an auth-only page.
///
/// Only same-origin absolute paths are honored; anything else (absent,
/// protocol-relative, full URLs, embedded whitespace or control characters,
/// the login page itself) falls back to `/`.
#[must_use]
pub fn safe_redirect_target(redirect_param: Option<&str>) -> String {
    match redirect_param.map(str::trim) {
        Some(path) if is_safe_local_path(path) && !is_login_path(path) => path.to_owned(),
        _ => DEFAULT_RETURN_PATH.to_owned(),
    }
}

/// Requested location as path plus query, tolerant of a leading `?` on
/// `search`.
#[must_use]
pub fn request_origin(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

fn is_safe_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.chars().any(|c| c == '\\' || c.is_control() || c.is_whitespace())
}

fn is_login_path(path: &str) -> bool {
    path == LOGIN_PATH || path.starts_with("/login?") || path.starts_with("/login/")
}
