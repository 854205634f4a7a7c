//! Send orchestration: persist the client, build the tracking link, hand the
//! message to the provider.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{error, info};

use super::TrackingError;
use crate::links::LinkGenerator;
use crate::repositories::{NewClient, TrackingStore};
use crate::sms::{DispatchOutcome, SmsDispatcher};

/// Validated send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub phone: String,
    pub name: String,
    pub national_id: String,
    pub message: String,
}

impl SendRequest {
    /// Extract the four required fields from a normalized body.
    ///
    /// A field is missing when its key is absent or `null`. Strings are kept
    /// as-is, other scalars are stringified.
    pub fn from_payload(payload: &JsonValue) -> Result<Self, TrackingError> {
        Ok(Self {
            phone: required(payload, "telefone")?,
            name: required(payload, "nome")?,
            national_id: required(payload, "cpf")?,
            message: required(payload, "mensagem")?,
        })
    }
}

fn required(payload: &JsonValue, field: &'static str) -> Result<String, TrackingError> {
    match payload.get(field) {
        None | Some(JsonValue::Null) => Err(TrackingError::MissingField { field }),
        Some(JsonValue::String(value)) => Ok(value.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// Outcome of a send. The client row and token exist in both arms.
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    Sent {
        token: String,
        url: String,
        provider_response: JsonValue,
    },
    Failed {
        token: String,
        url: String,
        detail: String,
    },
}

impl SendResult {
    pub fn token(&self) -> &str {
        match self {
            SendResult::Sent { token, .. } | SendResult::Failed { token, .. } => token,
        }
    }
}

/// Coordinates store, link generator and SMS dispatcher for one send.
pub struct SendOrchestrator {
    store: Arc<dyn TrackingStore>,
    links: LinkGenerator,
    dispatcher: Arc<dyn SmsDispatcher>,
}

impl SendOrchestrator {
    pub fn new(
        store: Arc<dyn TrackingStore>,
        links: LinkGenerator,
        dispatcher: Arc<dyn SmsDispatcher>,
    ) -> Self {
        Self {
            store,
            links,
            dispatcher,
        }
    }

    /// Validate, persist the client, then send the message with its link.
    ///
    /// The client is stored before the provider is called and is kept even
    /// when the send fails.
    pub async fn submit_send(&self, payload: &JsonValue) -> Result<SendResult, TrackingError> {
        let request = SendRequest::from_payload(payload)?;
        self.send(request).await
    }

    pub async fn send(&self, request: SendRequest) -> Result<SendResult, TrackingError> {
        let token = self.links.new_token();
        let client = self
            .store
            .create_client(NewClient {
                phone: request.phone.clone(),
                name: request.name,
                national_id: request.national_id,
                link_token: token.clone(),
            })
            .await?;

        let url = self.links.build_trackable_url(&client.link_token);
        let body = compose_message(&request.message, &url);

        match self.dispatcher.send(&request.phone, &body).await {
            DispatchOutcome::Sent(provider_response) => {
                info!(client_id = client.id, link_id = %token, "SMS dispatched with tracking link");
                Ok(SendResult::Sent {
                    token,
                    url,
                    provider_response,
                })
            }
            DispatchOutcome::Failed(detail) => {
                error!(client_id = client.id, link_id = %token, detail = %detail, "SMS dispatch failed");
                Ok(SendResult::Failed { token, url, detail })
            }
        }
    }
}

/// `"{message}\n\nAcesse: {url}"`
pub fn compose_message(message: &str, url: &str) -> String {
    format!("{}\n\nAcesse: {}", message, url)
}
