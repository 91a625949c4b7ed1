//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control is applied by
//! `App` through `RouteGuard`, never inside the page.

pub mod admin;
pub mod home;
pub mod login;
pub mod orders;
pub mod register;
