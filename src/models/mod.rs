//! # Data Models
//!
//! SeaORM entities for the three tracker tables plus the small response types
//! shared by handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod click;
pub mod client;
pub mod webhook;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Service description
    pub mensagem: String,
    /// Available endpoints keyed by method and path
    pub endpoints: std::collections::BTreeMap<String, String>,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        let endpoints = [
            ("POST /enviar-sms", "Enviar SMS com link rastreável"),
            ("GET /clique?id=...", "Rastrear cliques"),
            ("POST /webhook-kolmeya", "Receber webhooks do Kolmeya"),
            ("GET /dashboard", "Dashboard de estatísticas"),
        ]
        .into_iter()
        .map(|(route, description)| (route.to_string(), description.to_string()))
        .collect();

        Self {
            mensagem: "Sistema de Webhook Kolmeya".to_string(),
            endpoints,
        }
    }
}
