//! REST API helpers for communicating with the server.
//!
//! Client-side (`csr`): real HTTP calls via `gloo-net`.
//! Native builds (tests, tooling): stubs returning an error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. Form-facing calls return a
//! display string; session verification returns [`VerifyFailure`] so the
//! session store can tell rejections from transport failures in its logs.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use super::types::{AuthResponse, NewProduct, Order, Product, User};
#[cfg(feature = "csr")]
use super::types::ErrorBody;

/// Why a stored token could not be turned into a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyFailure {
    /// The server answered with a non-success status (bad signature, expired).
    Rejected(u16),
    /// The request never produced a usable response.
    Network(String),
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(status) => write!(f, "verification rejected: {status}"),
            Self::Network(msg) => write!(f, "verification failed: {msg}"),
        }
    }
}

#[cfg(any(test, feature = "csr"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Message shown for a failed form submission. Prefers the server's
/// `{"error": ...}` text and falls back to the status code.
#[cfg(any(test, feature = "csr"))]
fn failure_message(action: &str, status: u16, server_error: Option<String>) -> String {
    match server_error {
        Some(msg) if !msg.trim().is_empty() => msg,
        _ => format!("{action} failed: {status}"),
    }
}

#[cfg(feature = "csr")]
async fn read_failure(action: &str, resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let server_error = resp.json::<ErrorBody>().await.ok().map(|body| body.error);
    failure_message(action, status, server_error)
}

#[cfg(feature = "csr")]
async fn submit_credentials(action: &str, url: &str, payload: serde_json::Value) -> Result<AuthResponse, String> {
    let resp = gloo_net::http::Request::post(url)
        .json(&payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(read_failure(action, resp).await);
    }
    resp.json::<AuthResponse>().await.map_err(|e| e.to_string())
}

/// Sign in via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns a display string on transport failure or a non-OK status.
pub async fn login(email: &str, password: &str) -> Result<AuthResponse, String> {
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "email": email, "password": password });
        submit_credentials("login", "/api/auth/login", payload).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (email, password);
        Err("not available outside the browser".to_owned())
    }
}

/// Create an account via `POST /api/auth/register`.
///
/// # Errors
///
/// Returns a display string on transport failure or a non-OK status.
pub async fn register(email: &str, username: &str, password: &str) -> Result<AuthResponse, String> {
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "email": email, "username": username, "password": password });
        submit_credentials("registration", "/api/auth/register", payload).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (email, username, password);
        Err("not available outside the browser".to_owned())
    }
}

/// Check a stored token with `GET /api/auth/verify`.
///
/// # Errors
///
/// [`VerifyFailure::Rejected`] for any non-OK status,
/// [`VerifyFailure::Network`] when no usable response arrives.
pub async fn verify_session(token: &str) -> Result<User, VerifyFailure> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/verify")
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| VerifyFailure::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(VerifyFailure::Rejected(resp.status()));
        }
        resp.json::<User>().await.map_err(|e| VerifyFailure::Network(e.to_string()))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = token;
        Err(VerifyFailure::Network("not available outside the browser".to_owned()))
    }
}

/// Tell the server the session ended via `POST /api/auth/logout`. Best effort.
pub async fn logout(token: &str) {
    #[cfg(feature = "csr")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout")
            .header("Authorization", &bearer(token))
            .send()
            .await;
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = token;
    }
}

/// Fetch the public catalog from `/api/products`.
///
/// # Errors
///
/// Returns a display string on transport failure or a non-OK status.
pub async fn fetch_products() -> Result<Vec<Product>, String> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get("/api/products")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("loading products", resp).await);
        }
        resp.json::<Vec<Product>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        Err("not available outside the browser".to_owned())
    }
}

/// Add a catalog entry via `POST /api/products` (admin only).
///
/// # Errors
///
/// Returns a display string on transport failure or a non-OK status.
pub async fn create_product(token: &str, product: &NewProduct) -> Result<Product, String> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::post("/api/products")
            .header("Authorization", &bearer(token))
            .json(product)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("creating product", resp).await);
        }
        resp.json::<Product>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, product);
        Err("not available outside the browser".to_owned())
    }
}

/// Which order list to load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderScope {
    /// The signed-in user's own orders.
    Mine,
    /// Every order (admin dashboard).
    All,
}

#[cfg(any(test, feature = "csr"))]
fn orders_endpoint(scope: OrderScope) -> &'static str {
    match scope {
        OrderScope::Mine => "/api/orders",
        OrderScope::All => "/api/admin/orders",
    }
}

/// Fetch orders with the session token.
///
/// # Errors
///
/// Returns a display string on transport failure or a non-OK status.
pub async fn fetch_orders(token: &str, scope: OrderScope) -> Result<Vec<Order>, String> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::get(orders_endpoint(scope))
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(read_failure("loading orders", resp).await);
        }
        resp.json::<Vec<Order>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, scope);
        Err("not available outside the browser".to_owned())
    }
}
