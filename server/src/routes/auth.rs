//! Auth routes: registration, password login, token verification.
//!
//! Sessions are stateless signed tokens. The client keeps the token in local
//! storage and sends it as `Authorization: Bearer <token>`; every protected
//! handler re-verifies it through the [`AuthUser`] extractor.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use tokens::{Role, SessionClaims, TokenError};
use uuid::Uuid;

use crate::services::users::{self, UserError, UserRow};
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn verify_claims(state: &AppState, token: &str) -> Result<SessionClaims, StatusCode> {
    state.tokens.verify::<SessionClaims>(token).map_err(|e| {
        match e {
            TokenError::Expired => tracing::debug!("rejected expired session token"),
            TokenError::InvalidSignature => tracing::debug!("rejected session token with bad signature"),
            other => tracing::warn!(error = %other, "rejected undecodable session token"),
        }
        StatusCode::UNAUTHORIZED
    })
}

/// Authenticated user decoded from the bearer token.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub claims: SessionClaims,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)?;
        let app_state = AppState::from_ref(state);
        let claims = verify_claims(&app_state, token)?;
        Ok(Self { claims })
    }
}

/// Authenticated user whose role grants the admin dashboard.
pub struct StaffUser {
    pub claims: SessionClaims,
}

impl<S> FromRequestParts<S> for StaffUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { claims } = AuthUser::from_request_parts(parts, state).await?;
        if !claims.role.grants(Role::Admin) {
            return Err(StatusCode::FORBIDDEN);
        }
        Ok(Self { claims })
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

/// User identity as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl From<SessionClaims> for SessionUser {
    fn from(claims: SessionClaims) -> Self {
        Self { id: claims.sub, email: claims.email, username: claims.username, role: claims.role }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

pub(crate) fn user_error_to_status(err: &UserError) -> StatusCode {
    match err {
        UserError::InvalidEmail | UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        UserError::Conflict => StatusCode::CONFLICT,
        UserError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        UserError::Hash(_) | UserError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn user_error_response(err: UserError) -> Response {
    let status = user_error_to_status(&err);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "account operation failed");
        "internal error".to_owned()
    } else {
        err.to_string()
    };
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn issue_for(state: &AppState, user: &UserRow) -> Result<AuthResponse, Response> {
    let claims = user.claims();
    let token = state.tokens.issue(&claims, state.token_ttl).map_err(|e| {
        tracing::error!(error = %e, "token issue failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })?;
    Ok(AuthResponse { token, user: claims.into() })
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// `POST /api/auth/register`: create an account and return a session token.
pub async fn register(State(state): State<AppState>, Json(body): Json<RegisterBody>) -> Response {
    let user = match users::register(&state.pool, &body.email, &body.username, &body.password).await {
        Ok(user) => user,
        Err(e) => return user_error_response(e),
    };
    tracing::info!(user_id = %user.id, "account registered");

    match issue_for(&state, &user) {
        Ok(resp) => (StatusCode::CREATED, Json(resp)).into_response(),
        Err(resp) => resp,
    }
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/login`: check credentials and return a session token.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    let user = match users::authenticate(&state.pool, &body.email, &body.password).await {
        Ok(user) => user,
        Err(e) => {
            if matches!(e, UserError::InvalidCredentials) {
                tracing::warn!("login rejected");
            }
            return user_error_response(e);
        }
    };

    match issue_for(&state, &user) {
        Ok(resp) => Json(resp).into_response(),
        Err(resp) => resp,
    }
}

/// `GET /api/auth/verify`: decode the bearer token.
pub async fn verify(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.claims.into())
}

#[derive(Deserialize)]
pub struct VerifyBody {
    pub token: String,
}

/// `POST /api/auth/verify`: decode a token sent in the body.
pub async fn verify_body(
    State(state): State<AppState>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<SessionUser>, StatusCode> {
    let claims = verify_claims(&state, body.token.trim())?;
    Ok(Json(claims.into()))
}

/// `GET /api/auth/me`: current account as stored.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserRow>, StatusCode> {
    let user = users::find_user(&state.pool, auth.claims.sub)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "user lookup failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user))
}

/// `POST /api/auth/logout`: tokens are stateless; the client drops its copy.
pub async fn logout(auth: AuthUser) -> StatusCode {
    tracing::info!(user_id = %auth.claims.sub, "logout");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
