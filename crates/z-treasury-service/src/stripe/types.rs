//! Stripe API types.
//!
//! Treasury and Issuing objects are typed only as far as the service reads
//! them. The remaining fields are captured in `extra` so page props carry the
//! provider's full object.

use serde::{Deserialize, Serialize};

use z_treasury_core::{CardId, CardholderId, FinancialAccountId};

pub use z_treasury_core::{Authorization, Transaction};

/// Stripe list response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeList<T> {
    /// Object type (always "list").
    #[serde(default = "list_object")]
    pub object: String,
    /// Data items.
    pub data: Vec<T>,
    /// Whether there are more items.
    #[serde(default)]
    pub has_more: bool,
    /// URL for the list endpoint.
    #[serde(default)]
    pub url: Option<String>,
}

fn list_object() -> String {
    "list".to_string()
}

impl<T> StripeList<T> {
    /// Build a single-page list (used by fakes and tests).
    #[must_use]
    pub fn from_data(data: Vec<T>) -> Self {
        Self {
            object: list_object(),
            data,
            has_more: false,
            url: None,
        }
    }
}

/// Either an object ID or, when requested via `expand`, the object itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    /// The object was not expanded.
    Id(String),
    /// The expanded object.
    Object(Box<T>),
}

/// Treasury financial account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialAccount {
    /// Financial account ID.
    pub id: FinancialAccountId,
    /// Balance object (`cash`, `inbound_pending`, `outbound_pending`).
    #[serde(default)]
    pub balance: serde_json::Value,
    /// Remaining provider fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Issuing cardholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cardholder {
    /// Cardholder ID.
    pub id: CardholderId,
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Status (`active`, `inactive`, `blocked`).
    #[serde(default)]
    pub status: Option<String>,
    /// Remaining provider fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Issuing card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Card ID.
    pub id: CardId,
    /// Last four digits of the card number.
    #[serde(default)]
    pub last4: Option<String>,
    /// Status (`active`, `inactive`, `canceled`).
    #[serde(default)]
    pub status: Option<String>,
    /// The cardholder, expanded when requested.
    #[serde(default)]
    pub cardholder: Option<Expandable<Cardholder>>,
    /// Remaining provider fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Account onboarding link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountLink {
    /// Hosted onboarding URL.
    pub url: String,
    /// Expiry (Unix seconds).
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Remaining provider fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Terms acceptance recorded on a cardholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsAcceptance {
    /// Acceptance time (Unix seconds).
    pub date: i64,
    /// IP address the terms were accepted from.
    pub ip: String,
}

/// Cardholder update accepting the Issuing user terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardholderUpdate {
    /// Individual's first name.
    pub first_name: String,
    /// Individual's last name.
    pub last_name: String,
    /// Terms acceptance.
    pub terms_acceptance: TermsAcceptance,
}

impl CardholderUpdate {
    /// Form-encoded parameters for `POST /issuing/cardholders/{id}`.
    #[must_use]
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("individual[first_name]", self.first_name.clone()),
            ("individual[last_name]", self.last_name.clone()),
            (
                "individual[card_issuing][user_terms_acceptance][date]",
                self.terms_acceptance.date.to_string(),
            ),
            (
                "individual[card_issuing][user_terms_acceptance][ip]",
                self.terms_acceptance.ip.clone(),
            ),
        ]
    }
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,
}
