//! Stripe client tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use z_treasury_core::{AccountId, CardId, CardholderId, FinancialAccountId};
use z_treasury_service::stripe::{CardholderUpdate, Expandable, TermsAcceptance};
use z_treasury_service::{PaymentsGateway, StripeClient, StripeError};

const API_KEY: &str = "sk_test_treasury";

fn account() -> AccountId {
    "acct_1Connected".parse().unwrap()
}

async fn setup() -> (MockServer, StripeClient) {
    let server = MockServer::start().await;
    let client = StripeClient::with_base_url(API_KEY, server.uri()).unwrap();
    (server, client)
}

#[tokio::test]
async fn list_financial_accounts_scopes_to_connected_account() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/treasury/financial_accounts"))
        .and(basic_auth(API_KEY, ""))
        .and(header("Stripe-Account", "acct_1Connected"))
        .and(query_param(
            "expand[]",
            "data.financial_addresses.aba.account_number",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "url": "/v1/treasury/financial_accounts",
            "has_more": false,
            "data": [{
                "id": "fa_1Primary",
                "object": "treasury.financial_account",
                "balance": { "cash": { "usd": 4200 } },
                "financial_addresses": [{ "aba": { "account_number": "000123456789" } }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let accounts = client
        .list_financial_accounts(&account(), &["data.financial_addresses.aba.account_number"])
        .await
        .unwrap();

    assert_eq!(accounts.data.len(), 1);
    let fa = &accounts.data[0];
    assert_eq!(fa.id.as_str(), "fa_1Primary");
    assert_eq!(fa.balance["cash"]["usd"], 4200);
    assert_eq!(
        fa.extra["financial_addresses"][0]["aba"]["account_number"],
        "000123456789"
    );
}

#[tokio::test]
async fn list_transactions_sends_filters() {
    let (server, client) = setup().await;
    let financial_account: FinancialAccountId = "fa_1Primary".parse().unwrap();

    Mock::given(method("GET"))
        .and(path("/treasury/transactions"))
        .and(query_param("financial_account", "fa_1Primary"))
        .and(query_param("limit", "30"))
        .and(query_param("expand[]", "data.flow_details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "has_more": true,
            "data": [
                { "id": "trxn_2", "created": 1_717_329_600, "amount": -2500, "flow_type": "outbound_payment" },
                { "id": "trxn_1", "created": 1_717_243_200, "amount": 10000, "flow_type": "received_credit" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transactions = client
        .list_transactions(&account(), &financial_account, 30, &["data.flow_details"])
        .await
        .unwrap();

    assert!(transactions.has_more);
    assert_eq!(transactions.data[0].amount, -2500);
    assert_eq!(transactions.data[1].extra["flow_type"], "received_credit");
}

#[tokio::test]
async fn list_limits_are_capped() {
    let (server, client) = setup().await;
    let card: CardId = "ic_1Card".parse().unwrap();

    Mock::given(method("GET"))
        .and(path("/issuing/authorizations"))
        .and(query_param("card", "ic_1Card"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{ "id": "iauth_1", "amount": 1250, "approved": true }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authorizations = client
        .list_authorizations(&account(), &card, 500)
        .await
        .unwrap();

    assert_eq!(authorizations.data[0].amount, 1250);
    assert!(authorizations.data[0].approved);
}

#[tokio::test]
async fn retrieve_card_with_expanded_cardholder() {
    let (server, client) = setup().await;
    let card: CardId = "ic_1Card".parse().unwrap();

    Mock::given(method("GET"))
        .and(path("/issuing/cards/ic_1Card"))
        .and(header("Stripe-Account", "acct_1Connected"))
        .and(query_param("expand[]", "cardholder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ic_1Card",
            "object": "issuing.card",
            "last4": "4242",
            "status": "active",
            "cardholder": { "id": "ich_1Jenny", "name": "Jenny Rosen", "status": "active" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let card = client
        .retrieve_card(&account(), &card, &["cardholder"])
        .await
        .unwrap();

    assert_eq!(card.last4.as_deref(), Some("4242"));
    match card.cardholder {
        Some(Expandable::Object(holder)) => {
            assert_eq!(holder.id.as_str(), "ich_1Jenny");
            assert_eq!(holder.name.as_deref(), Some("Jenny Rosen"));
        }
        other => panic!("expected expanded cardholder, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpanded_cardholder_is_an_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/issuing/cards"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{ "id": "ic_1Card", "cardholder": "ich_1Jenny" }]
        })))
        .mount(&server)
        .await;

    let cards = client.list_cards(&account(), 10).await.unwrap();

    assert!(matches!(
        &cards.data[0].cardholder,
        Some(Expandable::Id(id)) if id == "ich_1Jenny"
    ));
}

#[tokio::test]
async fn update_cardholder_posts_terms_acceptance_form() {
    let (server, client) = setup().await;
    let cardholder: CardholderId = "ich_1Jenny".parse().unwrap();

    Mock::given(method("POST"))
        .and(path("/issuing/cardholders/ich_1Jenny"))
        .and(header("Stripe-Account", "acct_1Connected"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("individual%5Bfirst_name%5D=Jenny"))
        .and(body_string_contains("individual%5Blast_name%5D=Rosen"))
        .and(body_string_contains(
            "individual%5Bcard_issuing%5D%5Buser_terms_acceptance%5D%5Bdate%5D=1717243200",
        ))
        .and(body_string_contains(
            "individual%5Bcard_issuing%5D%5Buser_terms_acceptance%5D%5Bip%5D=203.0.113.7",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ich_1Jenny",
            "name": "Jenny Rosen",
            "status": "active"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = CardholderUpdate {
        first_name: "Jenny".into(),
        last_name: "Rosen".into(),
        terms_acceptance: TermsAcceptance {
            date: 1_717_243_200,
            ip: "203.0.113.7".into(),
        },
    };

    let holder = client
        .update_cardholder(&account(), &cardholder, &update)
        .await
        .unwrap();

    assert_eq!(holder.status.as_deref(), Some("active"));
}

#[tokio::test]
async fn api_errors_carry_provider_message() {
    let (server, client) = setup().await;
    let cardholder: CardholderId = "ich_1Missing".parse().unwrap();

    Mock::given(method("POST"))
        .and(path("/issuing/cardholders/ich_1Missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "code": "resource_missing",
                "message": "No such cardholder: 'ich_1Missing'"
            }
        })))
        .mount(&server)
        .await;

    let update = CardholderUpdate {
        first_name: "Jenny".into(),
        last_name: "Rosen".into(),
        terms_acceptance: TermsAcceptance {
            date: 1_717_243_200,
            ip: "203.0.113.7".into(),
        },
    };

    let err = client
        .update_cardholder(&account(), &cardholder, &update)
        .await
        .unwrap_err();

    match &err {
        StripeError::Api {
            status,
            error_type,
            code,
            ..
        } => {
            assert_eq!(*status, 404);
            assert_eq!(error_type, "invalid_request_error");
            assert_eq!(code.as_deref(), Some("resource_missing"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(err.message(), "No such cardholder: 'ich_1Missing'");
}

#[tokio::test]
async fn unparseable_error_body_reports_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/issuing/cardholders"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client.list_cardholders(&account(), 10).await.unwrap_err();

    assert!(matches!(err, StripeError::Api { status: 503, .. }));
}

#[tokio::test]
async fn onboarding_link_is_a_platform_call() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/account_links"))
        .and(basic_auth(API_KEY, ""))
        .and(body_string_contains("type=account_onboarding"))
        .and(body_string_contains("account=acct_1Connected"))
        .and(body_string_contains(
            "refresh_url=https%3A%2F%2Ftreasury.example.com%2Fonboard",
        ))
        .and(body_string_contains(
            "return_url=https%3A%2F%2Ftreasury.example.com%2Fonboard",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "account_link",
            "created": 1_717_243_200,
            "expires_at": 1_717_243_500,
            "url": "https://connect.stripe.com/setup/s/acct_1Connected/abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let link = client
        .create_account_onboarding_link(
            &account(),
            "https://treasury.example.com/onboard",
            "https://treasury.example.com/onboard",
        )
        .await
        .unwrap();

    assert_eq!(link.url, "https://connect.stripe.com/setup/s/acct_1Connected/abc");
    assert_eq!(link.expires_at, Some(1_717_243_500));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("stripe-account").is_none());
}
