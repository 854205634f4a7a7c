//! # Common API Types
//!
//! Request and response bodies shared by the tracker endpoints. Field names
//! follow the wire contract expected by existing Kolmeya integrations.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Send request body, accepted as JSON or form data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendSmsRequest {
    /// Destination phone number (e.g. "5511999999999")
    pub telefone: String,
    pub nome: String,
    /// CPF, stored as given
    pub cpf: String,
    /// Message text; the tracking link is appended
    pub mensagem: String,
}

/// Successful send
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendSmsResponse {
    /// Always "sucesso"
    pub status: String,
    pub mensagem: String,
    /// Tracking token of the created client
    pub link_id: String,
    /// Tracking URL embedded in the SMS
    pub link_rastreavel: String,
    /// Raw provider response
    #[schema(value_type = Object)]
    pub resposta_kolmeya: JsonValue,
}

/// Provider rejected or failed the send
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendSmsFailure {
    /// Always "erro"
    pub status: String,
    pub mensagem: String,
    /// Provider response body or transport error
    pub erro: String,
}

/// Webhook acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WebhookResponse {
    /// Always "ok"
    pub status: String,
    pub mensagem: String,
}
