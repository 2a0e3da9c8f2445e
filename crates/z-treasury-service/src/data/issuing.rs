//! Issuing reads: cardholders, cards, and per-card spend.

use serde::Serialize;

use z_treasury_core::{current_spend, AccountId, CardId};

use crate::stripe::{Authorization, Card, Cardholder, PaymentsGateway, StripeError, StripeList};

/// Page size for cardholder and card lists.
pub const LIST_LIMIT: u32 = 10;

/// Authorizations the current spend is computed over.
pub const AUTHORIZATIONS_LIMIT: u32 = 10;

/// Card page data.
#[derive(Debug, Clone, Serialize)]
pub struct CardTransactions {
    /// The card's latest authorizations, most recent first.
    pub card_authorizations: Vec<Authorization>,
    /// Approved spend over those authorizations, formatted as USD.
    pub current_spend: String,
    /// The card with its cardholder expanded.
    pub card_details: Card,
}

/// The account's cardholders.
pub async fn cardholders(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<StripeList<Cardholder>, StripeError> {
    gateway.list_cardholders(account, LIST_LIMIT).await
}

/// The account's cards.
pub async fn cards(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<StripeList<Card>, StripeError> {
    gateway.list_cards(account, LIST_LIMIT).await
}

/// Latest authorizations, current spend, and details for one card.
pub async fn card_transactions(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
    card: &CardId,
) -> Result<CardTransactions, StripeError> {
    let authorizations = gateway
        .list_authorizations(account, card, AUTHORIZATIONS_LIMIT)
        .await?
        .data;
    let spend = current_spend(&authorizations);

    let card_details = gateway.retrieve_card(account, card, &["cardholder"]).await?;

    Ok(CardTransactions {
        card_authorizations: authorizations,
        current_spend: spend,
        card_details,
    })
}
