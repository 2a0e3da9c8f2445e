//! The payments gateway seam.
//!
//! Handlers talk to Stripe only through [`PaymentsGateway`]. The process
//! bootstrap injects a [`super::StripeClient`]; tests inject an in-memory fake.

use async_trait::async_trait;

use z_treasury_core::{AccountId, CardId, CardholderId, FinancialAccountId};

use super::client::StripeError;
use super::types::{
    AccountLink, Authorization, Card, Cardholder, CardholderUpdate, FinancialAccount, StripeList,
    Transaction,
};

/// Treasury and Issuing operations, each scoped to a connected account.
#[async_trait]
pub trait PaymentsGateway: Send + Sync {
    /// List the connected account's financial accounts.
    async fn list_financial_accounts(
        &self,
        account: &AccountId,
        expand: &[&str],
    ) -> Result<StripeList<FinancialAccount>, StripeError>;

    /// List transactions on a financial account, most recent first.
    async fn list_transactions(
        &self,
        account: &AccountId,
        financial_account: &FinancialAccountId,
        limit: u32,
        expand: &[&str],
    ) -> Result<StripeList<Transaction>, StripeError>;

    /// List Issuing cardholders.
    async fn list_cardholders(
        &self,
        account: &AccountId,
        limit: u32,
    ) -> Result<StripeList<Cardholder>, StripeError>;

    /// List Issuing cards.
    async fn list_cards(
        &self,
        account: &AccountId,
        limit: u32,
    ) -> Result<StripeList<Card>, StripeError>;

    /// List authorizations on a card, most recent first.
    async fn list_authorizations(
        &self,
        account: &AccountId,
        card: &CardId,
        limit: u32,
    ) -> Result<StripeList<Authorization>, StripeError>;

    /// Retrieve a single card.
    async fn retrieve_card(
        &self,
        account: &AccountId,
        card: &CardId,
        expand: &[&str],
    ) -> Result<Card, StripeError>;

    /// Update a cardholder's name and record Issuing terms acceptance.
    async fn update_cardholder(
        &self,
        account: &AccountId,
        cardholder: &CardholderId,
        update: &CardholderUpdate,
    ) -> Result<Cardholder, StripeError>;

    /// Create a hosted onboarding link for the connected account.
    async fn create_account_onboarding_link(
        &self,
        account: &AccountId,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<AccountLink, StripeError>;
}
