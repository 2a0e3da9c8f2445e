//! Stripe integration for Treasury and Issuing.
//!
//! Stripe handles:
//! - Financial accounts and their transaction ledgers
//! - Issuing cardholders, cards and authorizations
//! - Hosted onboarding for connected accounts

pub mod client;
pub mod gateway;
pub mod types;

pub use client::StripeClient;
pub use client::StripeError;
pub use gateway::PaymentsGateway;
pub use types::*;
