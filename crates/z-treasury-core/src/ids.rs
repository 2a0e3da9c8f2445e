//! Identifier types for z-treasury.
//!
//! Stripe identifiers are opaque strings with a fixed, type-specific prefix
//! (`acct_`, `fa_`, `ic_`, `ich_`). Wrapping them in newtypes keeps a card ID
//! from being passed where a cardholder ID is expected.
//!
//! # Macro-based ID Types
//!
//! The `prefixed_id_type!` macro reduces boilerplate for the identifier types,
//! ensuring consistent implementation of serialization, parsing, and display traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to define a Stripe identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `String` with implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string, prefix checked)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`, `AsRef<str>`
macro_rules! prefixed_id_type {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// The prefix every identifier of this type carries.
            pub const PREFIX: &'static str = $prefix;

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                validate_prefixed(s, $prefix)?;
                Ok(Self(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                validate_prefixed(&value, $prefix)?;
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

prefixed_id_type!(
    AccountId,
    "acct_",
    "A connected account identifier.\n\nEvery gateway call is scoped to one connected account via the `Stripe-Account` header."
);
prefixed_id_type!(
    FinancialAccountId,
    "fa_",
    "A Treasury financial account identifier."
);
prefixed_id_type!(CardId, "ic_", "An Issuing card identifier.");
prefixed_id_type!(
    CardholderId,
    "ich_",
    "An Issuing cardholder identifier."
);

fn validate_prefixed(value: &str, prefix: &'static str) -> Result<(), IdError> {
    match value.strip_prefix(prefix) {
        Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_alphanumeric()) => {
            Ok(())
        }
        Some(_) => Err(IdError::Malformed { prefix }),
        None => Err(IdError::MissingPrefix { prefix }),
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input does not start with the expected prefix.
    #[error("identifier must start with `{prefix}`")]
    MissingPrefix {
        /// The expected prefix.
        prefix: &'static str,
    },

    /// The part after the prefix is empty or not alphanumeric.
    #[error("malformed `{prefix}` identifier")]
    Malformed {
        /// The expected prefix.
        prefix: &'static str,
    },
}
