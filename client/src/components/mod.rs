//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared session from Leptos context; pages compose
//! them with route-specific content.

pub mod guard;
pub mod nav_bar;
