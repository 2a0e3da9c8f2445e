//! Stripe API client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use z_treasury_core::{AccountId, CardId, CardholderId, FinancialAccountId};

use super::gateway::PaymentsGateway;
use super::types::{
    AccountLink, Authorization, Card, Cardholder, CardholderUpdate, FinancialAccount,
    StripeErrorResponse, StripeList, Transaction,
};

/// Header that scopes a platform request to a connected account.
const STRIPE_ACCOUNT_HEADER: &str = "Stripe-Account";

/// Request timeout for Stripe calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type.
        error_type: String,
        /// Error message.
        message: String,
        /// Error code.
        code: Option<String>,
    },

    /// The connected account has no Treasury financial account.
    #[error("no financial account for {0}")]
    NoFinancialAccount(AccountId),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StripeError {
    /// The human-readable message Stripe attached to the failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl StripeClient {
    /// Stripe API base URL.
    pub const BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a new Stripe client against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, StripeError> {
        Self::with_base_url(api_key, Self::BASE_URL)
    }

    /// Create a new Stripe client against a custom base URL (mock servers).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, StripeError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(StripeError::Configuration("API key is empty".into()));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StripeError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, path: &str, account: &AccountId) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .header(STRIPE_ACCOUNT_HEADER, account.as_str())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                status: status.as_u16(),
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                status: status.as_u16(),
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

fn expand_query<'a>(expand: &[&'a str]) -> Vec<(&'static str, &'a str)> {
    expand.iter().map(|field| ("expand[]", *field)).collect()
}

#[async_trait]
impl PaymentsGateway for StripeClient {
    async fn list_financial_accounts(
        &self,
        account: &AccountId,
        expand: &[&str],
    ) -> Result<StripeList<FinancialAccount>, StripeError> {
        tracing::debug!(account_id = %account, "Listing financial accounts");

        let response = self
            .get("/treasury/financial_accounts", account)
            .query(&expand_query(expand))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn list_transactions(
        &self,
        account: &AccountId,
        financial_account: &FinancialAccountId,
        limit: u32,
        expand: &[&str],
    ) -> Result<StripeList<Transaction>, StripeError> {
        let limit = limit.min(100).to_string();

        tracing::debug!(
            account_id = %account,
            financial_account = %financial_account,
            limit = %limit,
            "Listing treasury transactions"
        );

        let response = self
            .get("/treasury/transactions", account)
            .query(&[
                ("financial_account", financial_account.as_str()),
                ("limit", limit.as_str()),
            ])
            .query(&expand_query(expand))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn list_cardholders(
        &self,
        account: &AccountId,
        limit: u32,
    ) -> Result<StripeList<Cardholder>, StripeError> {
        let response = self
            .get("/issuing/cardholders", account)
            .query(&[("limit", limit.min(100))])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn list_cards(
        &self,
        account: &AccountId,
        limit: u32,
    ) -> Result<StripeList<Card>, StripeError> {
        let response = self
            .get("/issuing/cards", account)
            .query(&[("limit", limit.min(100))])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn list_authorizations(
        &self,
        account: &AccountId,
        card: &CardId,
        limit: u32,
    ) -> Result<StripeList<Authorization>, StripeError> {
        let limit = limit.min(100).to_string();

        let response = self
            .get("/issuing/authorizations", account)
            .query(&[("card", card.as_str()), ("limit", limit.as_str())])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn retrieve_card(
        &self,
        account: &AccountId,
        card: &CardId,
        expand: &[&str],
    ) -> Result<Card, StripeError> {
        let response = self
            .get(&format!("/issuing/cards/{card}"), account)
            .query(&expand_query(expand))
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn update_cardholder(
        &self,
        account: &AccountId,
        cardholder: &CardholderId,
        update: &CardholderUpdate,
    ) -> Result<Cardholder, StripeError> {
        tracing::debug!(
            account_id = %account,
            cardholder = %cardholder,
            "Updating cardholder terms acceptance"
        );

        let response = self
            .post(&format!("/issuing/cardholders/{cardholder}"))
            .header(STRIPE_ACCOUNT_HEADER, account.as_str())
            .form(&update.form_params())
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn create_account_onboarding_link(
        &self,
        account: &AccountId,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<AccountLink, StripeError> {
        // Account links are a platform call: the account goes in the body.
        let params = [
            ("type", "account_onboarding"),
            ("account", account.as_str()),
            ("refresh_url", refresh_url),
            ("return_url", return_url),
        ];

        let response = self.post("/account_links").form(&params).send().await?;

        Self::handle_response(response).await
    }
}
