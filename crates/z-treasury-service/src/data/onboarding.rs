//! Connected account onboarding.

use z_treasury_core::AccountId;

use crate::stripe::{PaymentsGateway, StripeError};

/// Create a hosted onboarding link that returns the user to `onboard_url`.
pub async fn onboarding_url(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
    onboard_url: &str,
) -> Result<String, StripeError> {
    let link = gateway
        .create_account_onboarding_link(account, onboard_url, onboard_url)
        .await?;

    tracing::info!(account_id = %account, "Onboarding link created");

    Ok(link.url)
}
