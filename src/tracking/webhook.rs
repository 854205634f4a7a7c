//! Provider callback intake.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{error, info, warn};

use super::TrackingError;
use crate::repositories::TrackingStore;

/// Classification of a callback's `evento` field. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEvent {
    Sent,
    Delivered,
    Clicked,
    Error,
    Unknown,
}

impl WebhookEvent {
    pub fn classify(payload: &JsonValue) -> Self {
        match payload.get("evento").and_then(JsonValue::as_str) {
            Some("sms_enviado") => WebhookEvent::Sent,
            Some("sms_entregue") => WebhookEvent::Delivered,
            Some("sms_clicado") => WebhookEvent::Clicked,
            Some("sms_erro") => WebhookEvent::Error,
            _ => WebhookEvent::Unknown,
        }
    }
}

/// Acknowledgement returned after a callback has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookAck {
    pub webhook_id: i32,
    pub event: WebhookEvent,
}

/// Stores every callback verbatim, whatever its shape.
pub struct WebhookReceiver {
    store: Arc<dyn TrackingStore>,
}

impl WebhookReceiver {
    pub fn new(store: Arc<dyn TrackingStore>) -> Self {
        Self { store }
    }

    pub async fn receive_webhook(&self, payload: JsonValue) -> Result<WebhookAck, TrackingError> {
        let event = WebhookEvent::classify(&payload);
        let stored = self.store.record_webhook(payload).await?;

        info!(webhook_id = stored.id, payload = %stored.payload, "Webhook received");

        match event {
            WebhookEvent::Sent => info!("SMS enviado com sucesso"),
            WebhookEvent::Delivered => info!("SMS entregue ao destinatário"),
            WebhookEvent::Clicked => info!("Link no SMS foi clicado"),
            WebhookEvent::Error => {
                let detail = stored
                    .payload
                    .get("erro")
                    .map(|value| match value {
                        JsonValue::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .unwrap_or_else(|| "Erro desconhecido".to_string());
                error!(detail = %detail, "Erro no envio do SMS");
            }
            WebhookEvent::Unknown => warn!("Webhook with unknown event"),
        }

        Ok(WebhookAck {
            webhook_id: stored.id,
            event,
        })
    }
}
