use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Role;

/// Payload the server embeds in every session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User identifier.
    pub sub: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
}
