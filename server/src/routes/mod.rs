//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST API under `/api` and serves the compiled
//! storefront/admin client bundle for every other path, falling back to
//! `index.html` so client-side routes survive a page reload.

pub mod auth;
pub mod orders;
pub mod products;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// REST API routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", get(auth::verify).post(auth::verify_body))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/products", get(products::list_products).post(products::create_product))
        .route("/api/products/{id}", get(products::get_product))
        .route("/api/orders", get(orders::my_orders))
        .route("/api/admin/orders", get(orders::all_orders))
        .route("/api/{*rest}", any(api_not_found))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full application: API, static client bundle, and middleware.
pub fn app(state: AppState, static_dir: &Path, cors_permissive: bool) -> Router {
    let client_bundle = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let router = api_routes(state)
        .fallback_service(client_bundle)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    if cors_permissive {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Unknown API paths must not fall through to the client bundle.
async fn api_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
