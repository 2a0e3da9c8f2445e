//! Provider records consumed by the chart and spend calculations.
//!
//! Only the fields this crate computes with are typed; everything else the
//! provider returns is kept in `extra` and serialized back out unchanged so
//! pages see the full object.

use serde::{Deserialize, Serialize};

/// A Treasury transaction against a financial account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID (`trxn_...`).
    pub id: String,

    /// Creation time (Unix seconds).
    pub created: i64,

    /// Signed amount in minor units. Positive is funds in.
    pub amount: i64,

    /// Remaining provider fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Transaction {
    /// Create a transaction with no extra provider fields.
    #[must_use]
    pub fn new(id: impl Into<String>, created: i64, amount: i64) -> Self {
        Self {
            id: id.into(),
            created,
            amount,
            extra: serde_json::Map::new(),
        }
    }
}

/// An Issuing authorization (a spend attempt on a card).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorization {
    /// Authorization ID (`iauth_...`).
    #[serde(default)]
    pub id: String,

    /// Amount in minor units.
    pub amount: i64,

    /// Whether the authorization was approved.
    pub approved: bool,

    /// Remaining provider fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Authorization {
    /// Create an authorization with no extra provider fields.
    #[must_use]
    pub fn new(id: impl Into<String>, amount: i64, approved: bool) -> Self {
        Self {
            id: id.into(),
            amount,
            approved,
            extra: serde_json::Map::new(),
        }
    }
}
