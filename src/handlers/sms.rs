//! # SMS Send Handler

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::error::ApiError;
use crate::handlers::types::{SendSmsFailure, SendSmsResponse};
use crate::normalization::normalize_body;
use crate::server::AppState;
use crate::tracking::SendResult;

/// Send an SMS carrying a freshly generated tracking link
///
/// The client is stored before the provider is called, so the tracking link
/// in the response stays clickable even when the send fails.
#[utoipa::path(
    post,
    path = "/enviar-sms",
    request_body(
        content = crate::handlers::types::SendSmsRequest,
        description = "JSON or application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "SMS sent", body = SendSmsResponse),
        (status = 400, description = "Missing field or invalid body", body = ApiError, example = json!({
            "erro": "Campo obrigatório não encontrado: telefone",
            "codigo": "VALIDATION_FAILED"
        })),
        (status = 500, description = "Provider failure", body = SendSmsFailure)
    ),
    tag = "sms"
)]
pub async fn send_sms(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload = normalize_body(&headers, &body)?;

    match state.sender.submit_send(&payload).await? {
        SendResult::Sent {
            token,
            url,
            provider_response,
        } => Ok(Json(SendSmsResponse {
            status: "sucesso".to_string(),
            mensagem: "SMS enviado com sucesso".to_string(),
            link_id: token,
            link_rastreavel: url,
            resposta_kolmeya: provider_response,
        })
        .into_response()),
        SendResult::Failed { detail, .. } => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SendSmsFailure {
                status: "erro".to_string(),
                mensagem: "Erro ao enviar SMS".to_string(),
                erro: detail,
            }),
        )
            .into_response()),
    }
}
