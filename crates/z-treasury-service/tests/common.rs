//! Common test utilities for z-treasury integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;

use z_treasury_core::{
    AccountId, Authorization, CardId, CardholderId, FinancialAccountId, SessionClaims,
    Transaction,
};
use z_treasury_service::stripe::{
    AccountLink, Card, Cardholder, CardholderUpdate, FinancialAccount, StripeList,
};
use z_treasury_service::{
    create_router, AppState, PaymentsGateway, ServiceConfig, SessionVerifier, StripeError,
};

/// Secret the test harness signs session tokens with.
pub const SESSION_SECRET: &str = "test-session-secret";

/// Connected account used by default.
pub const ACCOUNT_ID: &str = "acct_1TestAccount";

/// A call observed by the fake gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListFinancialAccounts { account: String, expand: Vec<String> },
    ListTransactions { account: String, limit: u32, expand: Vec<String> },
    ListCardholders { account: String, limit: u32 },
    ListCards { account: String, limit: u32 },
    ListAuthorizations { account: String, card: String, limit: u32 },
    RetrieveCard { account: String, card: String, expand: Vec<String> },
    UpdateCardholder { account: String, cardholder: String, update: CardholderUpdate },
    CreateOnboardingLink { account: String, refresh_url: String, return_url: String },
}

/// In-memory gateway with canned data.
#[derive(Default)]
pub struct FakeGateway {
    pub financial_accounts: Vec<FinancialAccount>,
    pub transactions: Vec<Transaction>,
    pub cardholders: Vec<Cardholder>,
    pub cards: Vec<Card>,
    pub authorizations: Vec<Authorization>,
    /// When set, `update_cardholder` fails with this provider message.
    pub reject_updates_with: Option<String>,
    /// When set, every read fails with this provider message.
    pub fail_reads_with: Option<String>,
    pub calls: Mutex<Vec<GatewayCall>>,
}

fn api_error(message: &str) -> StripeError {
    StripeError::Api {
        status: 400,
        error_type: "invalid_request_error".into(),
        message: message.into(),
        code: None,
    }
}

fn owned(expand: &[&str]) -> Vec<String> {
    expand.iter().map(|s| (*s).to_string()).collect()
}

impl FakeGateway {
    /// A gateway holding one financial account and nothing else.
    pub fn with_financial_account() -> Self {
        Self {
            financial_accounts: vec![financial_account("fa_1Primary", 125_000)],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_reads(&self) -> Result<(), StripeError> {
        match &self.fail_reads_with {
            Some(message) => Err(api_error(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentsGateway for FakeGateway {
    async fn list_financial_accounts(
        &self,
        account: &AccountId,
        expand: &[&str],
    ) -> Result<StripeList<FinancialAccount>, StripeError> {
        self.record(GatewayCall::ListFinancialAccounts {
            account: account.to_string(),
            expand: owned(expand),
        });
        self.check_reads()?;
        Ok(StripeList::from_data(self.financial_accounts.clone()))
    }

    async fn list_transactions(
        &self,
        account: &AccountId,
        _financial_account: &FinancialAccountId,
        limit: u32,
        expand: &[&str],
    ) -> Result<StripeList<Transaction>, StripeError> {
        self.record(GatewayCall::ListTransactions {
            account: account.to_string(),
            limit,
            expand: owned(expand),
        });
        self.check_reads()?;
        let data = self
            .transactions
            .iter()
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(StripeList::from_data(data))
    }

    async fn list_cardholders(
        &self,
        account: &AccountId,
        limit: u32,
    ) -> Result<StripeList<Cardholder>, StripeError> {
        self.record(GatewayCall::ListCardholders {
            account: account.to_string(),
            limit,
        });
        self.check_reads()?;
        Ok(StripeList::from_data(self.cardholders.clone()))
    }

    async fn list_cards(
        &self,
        account: &AccountId,
        limit: u32,
    ) -> Result<StripeList<Card>, StripeError> {
        self.record(GatewayCall::ListCards {
            account: account.to_string(),
            limit,
        });
        self.check_reads()?;
        Ok(StripeList::from_data(self.cards.clone()))
    }

    async fn list_authorizations(
        &self,
        account: &AccountId,
        card: &CardId,
        limit: u32,
    ) -> Result<StripeList<Authorization>, StripeError> {
        self.record(GatewayCall::ListAuthorizations {
            account: account.to_string(),
            card: card.to_string(),
            limit,
        });
        self.check_reads()?;
        Ok(StripeList::from_data(self.authorizations.clone()))
    }

    async fn retrieve_card(
        &self,
        account: &AccountId,
        card: &CardId,
        expand: &[&str],
    ) -> Result<Card, StripeError> {
        self.record(GatewayCall::RetrieveCard {
            account: account.to_string(),
            card: card.to_string(),
            expand: owned(expand),
        });
        self.check_reads()?;
        self.cards
            .iter()
            .find(|c| &c.id == card)
            .cloned()
            .ok_or_else(|| api_error("No such card"))
    }

    async fn update_cardholder(
        &self,
        account: &AccountId,
        cardholder: &CardholderId,
        update: &CardholderUpdate,
    ) -> Result<Cardholder, StripeError> {
        self.record(GatewayCall::UpdateCardholder {
            account: account.to_string(),
            cardholder: cardholder.to_string(),
            update: update.clone(),
        });
        if let Some(message) = &self.reject_updates_with {
            return Err(api_error(message));
        }
        Ok(serde_json::from_value(serde_json::json!({
            "id": cardholder.as_str(),
            "name": format!("{} {}", update.first_name, update.last_name),
            "status": "active"
        }))
        .unwrap())
    }

    async fn create_account_onboarding_link(
        &self,
        account: &AccountId,
        refresh_url: &str,
        return_url: &str,
    ) -> Result<AccountLink, StripeError> {
        self.record(GatewayCall::CreateOnboardingLink {
            account: account.to_string(),
            refresh_url: refresh_url.into(),
            return_url: return_url.into(),
        });
        Ok(serde_json::from_value(serde_json::json!({
            "object": "account_link",
            "url": "https://connect.stripe.com/setup/s/test",
            "expires_at": 1_717_243_500
        }))
        .unwrap())
    }
}

/// Build a financial account with a cash balance in cents.
pub fn financial_account(id: &str, cash_cents: i64) -> FinancialAccount {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "object": "treasury.financial_account",
        "balance": { "cash": { "usd": cash_cents } },
        "supported_currencies": ["usd"]
    }))
    .unwrap()
}

/// Build a card, optionally with an expanded cardholder.
pub fn card(id: &str, cardholder: &str) -> Card {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "last4": "4242",
        "status": "active",
        "cardholder": { "id": cardholder, "name": "Jenny Rosen", "status": "active" }
    }))
    .unwrap()
}

/// Build a cardholder.
pub fn cardholder(id: &str, name: &str) -> Cardholder {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "status": "active"
    }))
    .unwrap()
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The fake gateway behind the server.
    pub gateway: Arc<FakeGateway>,
    /// Verifier sharing the server's secret, for minting cookies.
    pub sessions: SessionVerifier,
}

impl TestHarness {
    /// Create a new test harness around `gateway`.
    pub fn new(gateway: FakeGateway) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            stripe_api_key: Some("sk_test_unused".into()),
            session_secret: Some(SESSION_SECRET.into()),
            public_url: "https://treasury.example.com".into(),
            ..ServiceConfig::default()
        };

        let gateway = Arc::new(gateway);
        let sessions = SessionVerifier::new(SESSION_SECRET);
        let state = AppState::new(config, gateway.clone(), sessions.clone());
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            gateway,
            sessions,
        }
    }

    /// `Cookie` header for an onboarded session on [`ACCOUNT_ID`].
    pub fn session_cookie(&self) -> String {
        self.cookie_for(ACCOUNT_ID, false)
    }

    /// `Cookie` header for an arbitrary session.
    pub fn cookie_for(&self, account_id: &str, requires_onboarding: bool) -> String {
        let token = self
            .sessions
            .issue(&SessionClaims {
                account_id: account_id.parse().expect("valid account id"),
                requires_onboarding,
                exp: None,
            })
            .expect("Failed to issue session token");
        format!("theme=dark; app_auth={token}")
    }
}
