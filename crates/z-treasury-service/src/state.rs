//! Application state.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::session::SessionVerifier;
use crate::stripe::{PaymentsGateway, StripeClient, StripeError};

/// Errors raised while assembling the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A required setting is absent.
    #[error("{0} is not configured")]
    Missing(&'static str),

    /// The Stripe client could not be built.
    #[error(transparent)]
    Stripe(#[from] StripeError),
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Payments gateway every handler talks to.
    pub gateway: Arc<dyn PaymentsGateway>,

    /// Session token verifier.
    pub sessions: SessionVerifier,
}

impl AppState {
    /// Create a new application state from already-built collaborators.
    #[must_use]
    pub fn new(
        config: ServiceConfig,
        gateway: Arc<dyn PaymentsGateway>,
        sessions: SessionVerifier,
    ) -> Self {
        Self {
            config,
            gateway,
            sessions,
        }
    }

    /// Build the Stripe client and session verifier from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the Stripe key or the session secret is missing, or if the
    /// HTTP client cannot be built.
    pub fn from_config(config: ServiceConfig) -> Result<Self, StartupError> {
        let api_key = config
            .stripe_api_key
            .as_deref()
            .ok_or(StartupError::Missing("STRIPE_SECRET_KEY"))?;
        let secret = config
            .session_secret
            .as_deref()
            .ok_or(StartupError::Missing("SESSION_SECRET"))?;

        let stripe = StripeClient::with_base_url(api_key, &config.stripe_api_base)?;
        tracing::info!(api_base = %config.stripe_api_base, "Stripe integration enabled");

        let sessions = SessionVerifier::new(secret);

        Ok(Self::new(config, Arc::new(stripe), sessions))
    }
}
