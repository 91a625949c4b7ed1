//! # client
//!
//! Leptos + WASM frontend for the storefront and admin dashboard.
//!
//! This crate contains pages, the route guard, the client session store, and
//! REST helpers. It is mounted client-side (`csr` feature) and served as a
//! static bundle by the `server` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
