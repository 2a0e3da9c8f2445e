//! Treasury financial account reads.

use z_treasury_core::{daily_funds, AccountId, ChartSeries};

use crate::stripe::{FinancialAccount, PaymentsGateway, StripeError, Transaction};

/// Transactions shown in the dashboard's transaction list.
pub const TRANSACTIONS_LIMIT: u32 = 30;

/// Transactions fed into the balance chart (the provider's maximum page).
pub const CHART_TRANSACTIONS_LIMIT: u32 = 100;

/// Expansion that includes the full ABA account number.
pub const EXPAND_ACCOUNT_NUMBER: &str = "data.financial_addresses.aba.account_number";

/// Expansion that includes each transaction's flow details.
pub const EXPAND_FLOW_DETAILS: &str = "data.flow_details";

async fn primary_financial_account(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
    expand: &[&str],
) -> Result<FinancialAccount, StripeError> {
    gateway
        .list_financial_accounts(account, expand)
        .await?
        .data
        .into_iter()
        .next()
        .ok_or_else(|| StripeError::NoFinancialAccount(account.clone()))
}

/// The account's first financial account.
pub async fn financial_account_details(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<FinancialAccount, StripeError> {
    primary_financial_account(gateway, account, &[]).await
}

/// The account's first financial account, with the ABA account number expanded.
pub async fn financial_account_details_with_account_number(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<FinancialAccount, StripeError> {
    primary_financial_account(gateway, account, &[EXPAND_ACCOUNT_NUMBER]).await
}

async fn recent_transactions(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
    limit: u32,
    expand: &[&str],
) -> Result<Vec<Transaction>, StripeError> {
    let financial_account = financial_account_details(gateway, account).await?;
    let transactions = gateway
        .list_transactions(account, &financial_account.id, limit, expand)
        .await?;
    Ok(transactions.data)
}

/// The latest transactions on the account's financial account.
pub async fn financial_account_transactions(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<Vec<Transaction>, StripeError> {
    recent_transactions(gateway, account, TRANSACTIONS_LIMIT, &[]).await
}

/// The latest transactions with flow details expanded.
pub async fn financial_account_transactions_expanded(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<Vec<Transaction>, StripeError> {
    recent_transactions(gateway, account, TRANSACTIONS_LIMIT, &[EXPAND_FLOW_DETAILS]).await
}

/// Daily funds-in / funds-out chart over the latest transactions.
pub async fn transactions_chart(
    gateway: &dyn PaymentsGateway,
    account: &AccountId,
) -> Result<ChartSeries, StripeError> {
    let transactions =
        recent_transactions(gateway, account, CHART_TRANSACTIONS_LIMIT, &[]).await?;

    tracing::debug!(
        account_id = %account,
        transactions = transactions.len(),
        "Building balance chart"
    );

    Ok(daily_funds(&transactions))
}
