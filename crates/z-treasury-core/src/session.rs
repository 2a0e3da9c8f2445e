//! Session capability.
//!
//! A [`Session`] is only ever produced by a verification step (see the
//! service crate's session verifier). Handlers that hold one may act on
//! behalf of the connected account it names.

use serde::{Deserialize, Serialize};

use crate::ids::AccountId;

/// A verified session for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The connected account every gateway call is scoped to.
    pub account_id: AccountId,

    /// Whether the account still has to complete provider onboarding.
    pub requires_onboarding: bool,
}

impl Session {
    /// Create a new session.
    #[must_use]
    pub fn new(account_id: AccountId, requires_onboarding: bool) -> Self {
        Self {
            account_id,
            requires_onboarding,
        }
    }
}

/// Token claims as they appear in the `app_auth` cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Connected account ID.
    pub account_id: AccountId,

    /// Onboarding flag.
    #[serde(default)]
    pub requires_onboarding: bool,

    /// Optional expiry (Unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        Self::new(claims.account_id, claims.requires_onboarding)
    }
}
