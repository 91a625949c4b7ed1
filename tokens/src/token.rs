//! HS256 session-token issue and verify.
//!
//! Verification checks structure and signature before anything in the token
//! is decoded, so a tampered token can only ever fail with
//! [`TokenError::InvalidSignature`].

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;

use std::fmt;

use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::Sha256;

use crate::Ttl;

type HmacSha256 = Hmac<Sha256>;

const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    InvalidSecret,
    #[error("payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("payload must not set the reserved claim `{0}`")]
    ReservedClaim(&'static str),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token claims do not match the expected payload: {0}")]
    Malformed(String),
    #[error("token expired")]
    Expired,
}

/// Decoded token with its timing claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<P> {
    pub payload: P,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Timing claims written by [`TokenService::issue_at`].
const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

#[derive(Deserialize)]
struct IncomingClaims<P> {
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    payload: P,
}

/// Current wall-clock time in unix seconds.
#[must_use]
pub fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

/// Issues and verifies signed session tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenService {
    mac: HmacSha256,
    header_b64: String,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build a service keyed by `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidSecret`] for an empty secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, TokenError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::InvalidSecret)?;
        Ok(Self { mac, header_b64: Base64UrlUnpadded::encode_string(HEADER_JSON.as_bytes()) })
    }

    /// Issue a token for `payload` that expires `ttl` from now.
    ///
    /// # Errors
    ///
    /// See [`TokenService::issue_at`].
    pub fn issue<P: Serialize>(&self, payload: &P, ttl: Ttl) -> Result<String, TokenError> {
        self.issue_at(payload, ttl, now_unix())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// - [`TokenError::Encode`] if `payload` does not serialize to a JSON
    ///   object.
    /// - [`TokenError::ReservedClaim`] if the object already has `iat` or
    ///   `exp`.
    pub fn issue_at<P: Serialize>(&self, payload: &P, ttl: Ttl, now: i64) -> Result<String, TokenError> {
        let mut claims = payload_object(payload)?;
        if let Some(key) = RESERVED_CLAIMS.into_iter().find(|key| claims.contains_key(*key)) {
            return Err(TokenError::ReservedClaim(key));
        }
        claims.insert("iat".to_owned(), Value::from(now));
        claims.insert("exp".to_owned(), Value::from(now.saturating_add(ttl.as_offset())));
        let claims_json = serde_json::to_vec(&claims)?;
        let signing_input = format!("{}.{}", self.header_b64, Base64UrlUnpadded::encode_string(&claims_json));
        let signature = self.sign(signing_input.as_bytes());
        Ok(format!("{signing_input}.{}", Base64UrlUnpadded::encode_string(&signature)))
    }

    /// Verify `token` against the current time and return its payload.
    ///
    /// # Errors
    ///
    /// See [`TokenService::verify_at`].
    pub fn verify<P: DeserializeOwned>(&self, token: &str) -> Result<P, TokenError> {
        self.verify_at(token, now_unix()).map(|v| v.payload)
    }

    /// Verify `token` as of `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// - [`TokenError::InvalidSignature`] for any structural or signature
    ///   mismatch.
    /// - [`TokenError::Malformed`] if a correctly signed token does not decode
    ///   into `P`.
    /// - [`TokenError::Expired`] once `exp <= now`.
    pub fn verify_at<P: DeserializeOwned>(&self, token: &str, now: i64) -> Result<Verified<P>, TokenError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::InvalidSignature);
        };

        let signature = decode_canonical(sig_b64).ok_or(TokenError::InvalidSignature)?;
        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        if header_b64 != self.header_b64 {
            return Err(TokenError::Malformed("unsupported token header".to_owned()));
        }
        let claims_json = decode_canonical(claims_b64)
            .ok_or_else(|| TokenError::Malformed("claims are not base64url".to_owned()))?;
        let claims: IncomingClaims<P> =
            serde_json::from_slice(&claims_json).map_err(|e| TokenError::Malformed(e.to_string()))?;

        if claims.exp <= now {
            return Err(TokenError::Expired);
        }

        Ok(Verified { payload: claims.payload, issued_at: claims.iat, expires_at: claims.exp })
    }

    fn sign(&self, input: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(input);
        mac.finalize().into_bytes().to_vec()
    }
}

fn payload_object<P: Serialize>(payload: &P) -> Result<Map<String, Value>, TokenError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        _ => Err(TokenError::Encode(serde_json::Error::custom("payload must serialize to a JSON object"))),
    }
}

/// Decode unpadded base64url, rejecting encodings that do not round-trip.
fn decode_canonical(segment: &str) -> Option<Vec<u8>> {
    let bytes = Base64UrlUnpadded::decode_vec(segment).ok()?;
    (Base64UrlUnpadded::encode_string(&bytes) == segment).then_some(bytes)
}
