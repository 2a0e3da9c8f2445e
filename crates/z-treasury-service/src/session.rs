//! Session cookie handling and extractors.
//!
//! This module provides:
//! - `SessionVerifier` - turns an `app_auth` token into a [`Session`]
//! - `PageSession` - session for page endpoints; redirects when absent or
//!   when onboarding is still required
//! - `ApiSession` - session for API endpoints; rejects with 401

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use z_treasury_core::{Session, SessionClaims};

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "app_auth";

/// Where page requests without a session are sent.
pub const SIGNIN_PATH: &str = "/signin";

/// Where page requests for accounts that still need onboarding are sent.
pub const ONBOARD_PATH: &str = "/onboard";

/// Errors produced while reading a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The request carries no `app_auth` cookie.
    #[error("session cookie missing")]
    MissingCookie,

    /// The token failed signature, expiry, or claims validation.
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Verifies and issues HS256 session tokens.
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl SessionVerifier {
    /// Create a verifier for tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry only account claims; `exp` is checked when present.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return the session it grants.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidToken`] if the token is malformed, signed
    /// with another key, expired, or its account ID is not an `acct_` ID.
    pub fn verify(&self, token: &str) -> Result<Session, SessionError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(Session::from(data.claims))
    }

    /// Sign a token for `claims`.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be encoded.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier").finish_non_exhaustive()
    }
}

/// Find a cookie value in a `Cookie` header.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then_some(value.trim().trim_matches('"'))
    })
}

/// Read and verify the session carried by a request.
fn read_session(parts: &Parts, state: &AppState) -> Result<Session, SessionError> {
    let token = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| cookie_value(header, SESSION_COOKIE))
        .ok_or(SessionError::MissingCookie)?;

    state.sessions.verify(token)
}

/// Rejection for page endpoints: a redirect, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRedirect(pub &'static str);

impl IntoResponse for SessionRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// A session for an account that has finished onboarding.
#[derive(Debug, Clone)]
pub struct PageSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for PageSession {
    type Rejection = SessionRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = read_session(parts, state).map_err(|e| {
            tracing::debug!(error = %e, "No usable session, redirecting to sign in");
            SessionRedirect(SIGNIN_PATH)
        })?;

        if session.requires_onboarding {
            tracing::debug!(account_id = %session.account_id, "Onboarding required");
            return Err(SessionRedirect(ONBOARD_PATH));
        }

        Ok(Self(session))
    }
}

/// A session for API endpoints. Onboarding state is not checked.
#[derive(Debug, Clone)]
pub struct ApiSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ApiSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        read_session(parts, state).map(Self).map_err(|e| {
            tracing::debug!(error = %e, "Rejecting API request without a session");
            ApiError::Unauthorized("Not signed in".into())
        })
    }
}
