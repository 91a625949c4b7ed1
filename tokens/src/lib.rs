//! Shared session-token model for the storefront `server` and `client`.
//!
//! This crate owns the signed session token format, its lifetime parsing,
//! and the closed role set carried inside tokens. The server issues and
//! verifies tokens; the client only needs the claim and role types.
//!
//! TOKEN FORMAT
//! ============
//! `base64url(header).base64url(claims).base64url(hmac_sha256)`, unpadded.
//! Claims are the caller's payload object flattened together with `iat` and
//! `exp` (unix seconds).

mod claims;
mod role;
mod token;
mod ttl;

pub use claims::SessionClaims;
pub use role::{Role, RoleParseError};
pub use token::{TokenError, TokenService, Verified, now_unix};
pub use ttl::{Ttl, TtlParseError};
