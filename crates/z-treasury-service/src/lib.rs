//! Z-Treasury HTTP Service.
//!
//! This crate serves the data behind the treasury dashboard, including:
//!
//! - Financial account balances and transactions
//! - The daily funds-in / funds-out chart
//! - Issuing cardholders, cards and current card spend
//! - Cardholder terms acceptance and account onboarding links
//!
//! # Sessions
//!
//! Every endpoint except `/health` reads the `app_auth` cookie. Page
//! endpoints redirect when it is missing or when the account still needs
//! onboarding; API endpoints answer `401`.
//!
//! # Gateway
//!
//! All Stripe access goes through the [`PaymentsGateway`] trait held in
//! [`AppState`], built once at startup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for the router

pub mod config;
pub mod data;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use session::{SessionVerifier, SESSION_COOKIE};
pub use state::{AppState, StartupError};
pub use stripe::{PaymentsGateway, StripeClient, StripeError};
