//! # Webhook Handlers
//!
//! Intake for Kolmeya delivery-status callbacks. The endpoint is public: the
//! provider does not sign its callbacks.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
};
use serde_json::Value as JsonValue;

use crate::error::ApiError;
use crate::handlers::types::WebhookResponse;
use crate::normalization::normalize_body;
use crate::server::AppState;

/// Store a provider callback verbatim
#[utoipa::path(
    post,
    path = "/webhook-kolmeya",
    request_body(content = Option<JsonValue>, description = "Callback payload, JSON or form-encoded (opaque to API)"),
    responses(
        (status = 200, description = "Webhook stored", body = WebhookResponse, example = json!({
            "status": "ok",
            "mensagem": "Webhook processado com sucesso"
        })),
        (status = 400, description = "Undecodable JSON body", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    ),
    tag = "webhooks"
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let payload = normalize_body(&headers, &body)?;
    state.webhooks.receive_webhook(payload).await?;

    Ok(Json(WebhookResponse {
        status: "ok".to_string(),
        mensagem: "Webhook processado com sucesso".to_string(),
    }))
}
