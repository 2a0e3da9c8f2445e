//! Service configuration.

use serde::Deserialize;
use std::path::Path;

use crate::stripe::StripeClient;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Stripe secret API key.
    pub stripe_api_key: Option<String>,

    /// Stripe API base URL (default: `<https://api.stripe.com/v1>`).
    pub stripe_api_base: String,

    /// HMAC secret the `app_auth` session tokens are signed with.
    pub session_secret: Option<String>,

    /// Public URL of the dashboard, used for onboarding return links.
    pub public_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    api_key: String,
    #[serde(default)]
    session_secret: Option<String>,
}

/// Candidate locations of the Stripe secrets file.
const STRIPE_SECRET_PATHS: [&str; 3] = [
    ".secrets/stripe.json",
    "z-treasury/.secrets/stripe.json",
    "../.secrets/stripe.json",
];

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let (stripe_api_key, file_session_secret) = load_stripe_secrets(&STRIPE_SECRET_PATHS);

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            stripe_api_key,
            stripe_api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| StripeClient::BASE_URL.into()),
            session_secret: std::env::var("SESSION_SECRET").ok().or(file_session_secret),
            public_url: std::env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into())
                .trim_end_matches('/')
                .to_string(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// URL Stripe sends the user back to after (or to retry) onboarding.
    #[must_use]
    pub fn onboarding_url(&self) -> String {
        format!("{}/onboard", self.public_url)
    }
}

/// Load Stripe secrets from file or environment.
fn load_stripe_secrets(paths: &[&str]) -> (Option<String>, Option<String>) {
    for path in paths {
        if let Ok(secrets) = load_secrets_file::<StripeSecrets>(path) {
            tracing::info!(path = %path, "Loaded Stripe secrets from file");
            return (Some(secrets.api_key), secrets.session_secret);
        }
    }

    // Fall back to environment variables
    tracing::debug!("Stripe secrets file not found, using environment variables");
    (
        std::env::var("STRIPE_SECRET_KEY")
            .or_else(|_| std::env::var("STRIPE_API_KEY"))
            .ok(),
        None,
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            stripe_api_key: None,
            stripe_api_base: StripeClient::BASE_URL.into(),
            session_secret: None,
            public_url: "http://localhost:3000".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
