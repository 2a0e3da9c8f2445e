//! Cardholder update handler.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use z_treasury_core::CardholderId;

use crate::error::ApiError;
use crate::session::ApiSession;
use crate::state::AppState;
use crate::stripe::{CardholderUpdate, TermsAcceptance};

/// Header set by the reverse proxy with the original client address.
const REAL_IP_HEADER: &str = "x-real-ip";

/// Update cardholder request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardholderRequest {
    /// Cardholder to update.
    pub cardholder_id: String,
    /// Individual's first name.
    pub first_name: String,
    /// Individual's last name.
    pub last_name: String,
}

/// Update cardholder response.
#[derive(Debug, Serialize)]
pub struct UpdateCardholderResponse {
    /// Always `true`.
    pub ok: bool,
}

fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> Option<String> {
    headers
        .get(REAL_IP_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
}

/// Record the cardholder's name and acceptance of the Issuing terms.
///
/// Provider rejections are returned as `401` with the provider's message.
pub async fn update_cardholder(
    State(state): State<Arc<AppState>>,
    ApiSession(session): ApiSession,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<UpdateCardholderRequest>, JsonRejection>,
) -> Result<Json<UpdateCardholderResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Unauthorized(e.body_text()))?;

    let cardholder_id: CardholderId = body
        .cardholder_id
        .parse()
        .map_err(|e| ApiError::Unauthorized(format!("Invalid cardholder ID: {e}")))?;

    let ip = client_ip(&headers, peer.as_ref())
        .ok_or_else(|| ApiError::Unauthorized("Unable to determine client IP address".into()))?;

    let update = CardholderUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        terms_acceptance: TermsAcceptance {
            date: chrono::Utc::now().timestamp(),
            ip,
        },
    };

    state
        .gateway
        .update_cardholder(&session.account_id, &cardholder_id, &update)
        .await
        .map_err(|e| {
            tracing::warn!(
                account_id = %session.account_id,
                cardholder = %cardholder_id,
                error = %e,
                "Cardholder update rejected"
            );
            ApiError::Unauthorized(e.message())
        })?;

    tracing::info!(
        account_id = %session.account_id,
        cardholder = %cardholder_id,
        "Cardholder accepted Issuing terms"
    );

    Ok(Json(UpdateCardholderResponse { ok: true }))
}

/// Any method other than `POST`.
pub async fn method_not_supported() -> ApiError {
    ApiError::BadRequest("Bad Request".into())
}
