//! Client-side application state.
//!
//! ARCHITECTURE
//! ============
//! `auth` is the plain session record and its transitions; `session` wires
//! that record to token storage and the verification endpoint and is provided
//! to components through Leptos context.

pub mod auth;
pub mod session;
