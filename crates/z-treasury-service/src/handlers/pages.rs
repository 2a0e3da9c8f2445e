//! Page data handlers.
//!
//! Each handler returns the props its page renders with. Requests without a
//! session are redirected to `/signin`, and accounts that still need
//! onboarding to `/onboard`, by the [`PageSession`] extractor. Gateway
//! failures become a generic 500.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use z_treasury_core::{CardId, ChartSeries};

use crate::data::issuing::{self, CardTransactions};
use crate::data::treasury;
use crate::error::ApiError;
use crate::session::PageSession;
use crate::state::AppState;
use crate::stripe::{Card, Cardholder, FinancialAccount, StripeList, Transaction};

/// Dashboard props.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProps {
    /// The account's financial account (balances).
    pub financial_account: FinancialAccount,
    /// Latest transactions with flow details.
    pub fa_transactions: Vec<Transaction>,
    /// Daily funds-in / funds-out chart.
    pub fa_transactions_chart: ChartSeries,
}

/// Dashboard: balance, recent transactions, and the funds chart.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    PageSession(session): PageSession,
) -> Result<Json<DashboardProps>, ApiError> {
    let gateway = state.gateway.as_ref();
    let account = &session.account_id;

    let financial_account = treasury::financial_account_details(gateway, account).await?;
    let fa_transactions = treasury::financial_account_transactions_expanded(gateway, account).await?;
    let fa_transactions_chart = treasury::transactions_chart(gateway, account).await?;

    Ok(Json(DashboardProps {
        financial_account,
        fa_transactions,
        fa_transactions_chart,
    }))
}

/// Financial account page props.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAccountProps {
    /// The financial account with its ABA account number.
    pub financial_account: FinancialAccount,
    /// Latest transactions.
    pub fa_transactions: Vec<Transaction>,
}

/// Financial account page: routing details and recent transactions.
pub async fn financial_account(
    State(state): State<Arc<AppState>>,
    PageSession(session): PageSession,
) -> Result<Json<FinancialAccountProps>, ApiError> {
    let gateway = state.gateway.as_ref();
    let account = &session.account_id;

    let financial_account =
        treasury::financial_account_details_with_account_number(gateway, account).await?;
    let fa_transactions = treasury::financial_account_transactions(gateway, account).await?;

    Ok(Json(FinancialAccountProps {
        financial_account,
        fa_transactions,
    }))
}

/// Cardholders page props.
#[derive(Debug, Serialize)]
pub struct CardholdersProps {
    /// Cardholder list object.
    pub cardholders: StripeList<Cardholder>,
}

/// Cardholders page.
pub async fn cardholders(
    State(state): State<Arc<AppState>>,
    PageSession(session): PageSession,
) -> Result<Json<CardholdersProps>, ApiError> {
    let cardholders = issuing::cardholders(state.gateway.as_ref(), &session.account_id).await?;
    Ok(Json(CardholdersProps { cardholders }))
}

/// Cards page props.
#[derive(Debug, Serialize)]
pub struct CardsProps {
    /// Card list object.
    pub cards: StripeList<Card>,
}

/// Cards page.
pub async fn cards(
    State(state): State<Arc<AppState>>,
    PageSession(session): PageSession,
) -> Result<Json<CardsProps>, ApiError> {
    let cards = issuing::cards(state.gateway.as_ref(), &session.account_id).await?;
    Ok(Json(CardsProps { cards }))
}

/// Card page: latest authorizations, current spend, and card details.
pub async fn card(
    State(state): State<Arc<AppState>>,
    PageSession(session): PageSession,
    Path(card_id): Path<String>,
) -> Result<Json<CardTransactions>, ApiError> {
    let card_id: CardId = card_id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid card ID: {e}")))?;

    let props =
        issuing::card_transactions(state.gateway.as_ref(), &session.account_id, &card_id).await?;

    tracing::debug!(
        account_id = %session.account_id,
        card_id = %card_id,
        current_spend = %props.current_spend,
        "Card page loaded"
    );

    Ok(Json(props))
}
