//! Account service: registration, credential checks, user lookup.
//!
//! Passwords are stored as Argon2id PHC strings. Email addresses are
//! normalized to lowercase before they touch the database so the unique
//! index behaves case-insensitively.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::Rng;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokens::{Role, SessionClaims};
use uuid::Uuid;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 128;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid username: {0}")]
    InvalidUsername(&'static str),
    #[error("invalid password: {0}")]
    InvalidPassword(&'static str),
    #[error("email or username already registered")]
    Conflict,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}

impl UserRow {
    /// Claims to embed in a session token for this user.
    #[must_use]
    pub fn claims(&self) -> SessionClaims {
        SessionClaims {
            sub: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.chars().any(char::is_whitespace)
    {
        return None;
    }
    Some(normalized)
}

/// Check a username against length and character rules.
///
/// # Errors
///
/// Returns [`UserError::InvalidUsername`] describing the first rule broken.
pub fn validate_username(username: &str) -> Result<(), UserError> {
    let len = username.chars().count();
    if len < USERNAME_MIN {
        return Err(UserError::InvalidUsername("must be at least 3 characters"));
    }
    if len > USERNAME_MAX {
        return Err(UserError::InvalidUsername("must be at most 32 characters"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(UserError::InvalidUsername("may only contain letters, digits, '_' and '-'"));
    }
    Ok(())
}

/// Check a password against length rules.
///
/// # Errors
///
/// Returns [`UserError::InvalidPassword`] describing the rule broken.
pub fn validate_password(password: &str) -> Result<(), UserError> {
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err(UserError::InvalidPassword("must be at least 8 characters"));
    }
    if len > PASSWORD_MAX {
        return Err(UserError::InvalidPassword("must be at most 128 characters"));
    }
    Ok(())
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

/// Hash a password into an Argon2id PHC string.
///
/// # Errors
///
/// Returns [`UserError::Hash`] if salt encoding or hashing fails.
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| UserError::Hash(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::Hash(e.to_string()))
}

/// Check `password` against a stored PHC string. Unparseable hashes never match.
#[must_use]
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

/// [`hash_password`] on the blocking pool.
///
/// # Errors
///
/// Returns [`UserError::Hash`] if hashing fails or the task is lost.
pub async fn hash_password_blocking(password: String) -> Result<String, UserError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| UserError::Hash(e.to_string()))?
}

/// [`verify_password`] on the blocking pool. A lost task never matches.
pub async fn verify_password_blocking(stored_hash: String, password: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&stored_hash, &password))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "password verification task failed");
            false
        })
}

// =============================================================================
// PERSISTENCE
// =============================================================================

const USER_COLUMNS: &str = r#"id, email, username, role,
    to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at"#;

fn role_from_db(raw: &str) -> Role {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(role = raw, "unknown role in users table; treating as USER");
        Role::User
    })
}

fn user_from_row(row: &PgRow) -> UserRow {
    let role: String = row.get("role");
    UserRow {
        id: row.get("id"),
        email: row.get("email"),
        username: row.get("username"),
        role: role_from_db(&role),
        created_at: row.get("created_at"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Validate and create a new `USER` account.
///
/// # Errors
///
/// Returns a validation error, [`UserError::Conflict`] on a duplicate email
/// or username, or a database/hashing error.
pub async fn register(pool: &PgPool, email: &str, username: &str, password: &str) -> Result<UserRow, UserError> {
    let email = normalize_email(email).ok_or(UserError::InvalidEmail)?;
    let username = username.trim();
    validate_username(username)?;
    validate_password(password)?;
    let password_hash = hash_password_blocking(password.to_owned()).await?;

    let sql = format!(
        "INSERT INTO users (email, username, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(&email)
        .bind(username)
        .bind(&password_hash)
        .bind(Role::User.as_str())
        .fetch_one(pool)
        .await
        .map_err(|e| if is_unique_violation(&e) { UserError::Conflict } else { UserError::Db(e) })?;

    Ok(user_from_row(&row))
}

/// Check an email/password pair and return the matching account.
///
/// # Errors
///
/// Returns [`UserError::InvalidCredentials`] for an unknown email or wrong
/// password, or a database error.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<UserRow, UserError> {
    let email = normalize_email(email).ok_or(UserError::InvalidCredentials)?;

    let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
    let Some(row) = sqlx::query(&sql).bind(&email).fetch_optional(pool).await? else {
        return Err(UserError::InvalidCredentials);
    };

    let stored_hash: String = row.get("password_hash");
    if !verify_password_blocking(stored_hash, password.to_owned()).await {
        return Err(UserError::InvalidCredentials);
    }
    Ok(user_from_row(&row))
}

/// Load a user by id.
///
/// # Errors
///
/// Returns a database error.
pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, UserError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    let row = sqlx::query(&sql).bind(user_id).fetch_optional(pool).await?;
    Ok(row.as_ref().map(user_from_row))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
