//! Core types and calculations for z-treasury.
//!
//! This crate provides the provider-independent pieces of the treasury dashboard:
//!
//! - **Identifiers**: `AccountId`, `FinancialAccountId`, `CardId`, `CardholderId`
//! - **Sessions**: `Session`, `SessionClaims`
//! - **Records**: `Transaction`, `Authorization`
//! - **Chart**: `ChartSeries`, `DailyBucket` and the daily funds aggregation
//! - **Spend**: approved-authorization totals formatted as USD
//!
//! # Amounts
//!
//! Provider amounts are signed integers in minor units (cents). The chart
//! converts them to major units with `rust_decimal`, so no floating point is
//! involved until the values are serialized for the charting front end.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chart;
pub mod ids;
pub mod records;
pub mod session;
pub mod spend;

pub use chart::{daily_funds, daily_funds_in, ChartSeries, DailyBucket, NO_DATA_SENTINEL};
pub use ids::{AccountId, CardId, CardholderId, FinancialAccountId, IdError};
pub use records::{Authorization, Transaction};
pub use session::{Session, SessionClaims};
pub use spend::{approved_total_cents, current_spend, format_usd};
