//! Onboarding link handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::data::onboarding::onboarding_url;
use crate::error::ApiError;
use crate::session::ApiSession;
use crate::state::AppState;

/// Onboarding link response.
#[derive(Debug, Serialize)]
pub struct OnboardingLinkResponse {
    /// Hosted onboarding URL to send the user to.
    pub url: String,
}

/// Create a hosted onboarding link for the signed-in account.
///
/// Does not require onboarding to be complete.
pub async fn create_onboarding_link(
    State(state): State<Arc<AppState>>,
    ApiSession(session): ApiSession,
) -> Result<Json<OnboardingLinkResponse>, ApiError> {
    let return_url = state.config.onboarding_url();

    let url = onboarding_url(state.gateway.as_ref(), &session.account_id, &return_url)
        .await
        .map_err(|e| {
            tracing::error!(
                account_id = %session.account_id,
                error = %e,
                "Failed to create onboarding link"
            );
            ApiError::ExternalService(e.message())
        })?;

    Ok(Json(OnboardingLinkResponse { url }))
}
