//! In-memory doubles for the tracking services' collaborators.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;

use crate::error::RepositoryError;
use crate::models::click::Model as ClickModel;
use crate::models::client::Model as ClientModel;
use crate::models::webhook::{Model as WebhookModel, RECEIVED_EVENT};
use crate::repositories::{NewClick, NewClient, TrackingStore};
use crate::sms::{DispatchOutcome, SmsDispatcher};

#[derive(Default)]
pub struct MemoryStore {
    clients: Mutex<Vec<ClientModel>>,
    clicks: Mutex<Vec<ClickModel>>,
    webhooks: Mutex<Vec<WebhookModel>>,
}

impl MemoryStore {
    pub fn clients(&self) -> Vec<ClientModel> {
        self.clients.lock().unwrap().clone()
    }

    pub fn webhooks(&self) -> Vec<WebhookModel> {
        self.webhooks.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackingStore for MemoryStore {
    async fn create_client(&self, client: NewClient) -> Result<ClientModel, RepositoryError> {
        let mut clients = self.clients.lock().unwrap();
        let model = ClientModel {
            id: clients.len() as i32 + 1,
            phone: client.phone,
            name: client.name,
            national_id: client.national_id,
            link_token: client.link_token,
            created_at: Utc::now().fixed_offset(),
        };
        clients.push(model.clone());
        Ok(model)
    }

    async fn find_client_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ClientModel>, RepositoryError> {
        Ok(self
            .clients
            .lock()
            .unwrap()
            .iter()
            .find(|client| client.link_token == token)
            .cloned())
    }

    async fn record_click(&self, click: NewClick) -> Result<ClickModel, RepositoryError> {
        if self.find_client_by_token(&click.link_token).await?.is_none() {
            return Err(RepositoryError::NotFound(click.link_token));
        }
        let mut clicks = self.clicks.lock().unwrap();
        let model = ClickModel {
            id: clicks.len() as i32 + 1,
            link_token: click.link_token,
            phone: Some(click.phone),
            name: Some(click.name),
            national_id: Some(click.national_id),
            source_address: click.source_address,
            user_agent: click.user_agent,
            clicked_at: Utc::now().fixed_offset(),
        };
        clicks.push(model.clone());
        Ok(model)
    }

    async fn record_webhook(&self, payload: JsonValue) -> Result<WebhookModel, RepositoryError> {
        let mut webhooks = self.webhooks.lock().unwrap();
        let model = WebhookModel {
            id: webhooks.len() as i32 + 1,
            event: RECEIVED_EVENT.to_string(),
            payload,
            received_at: Utc::now().fixed_offset(),
        };
        webhooks.push(model.clone());
        Ok(model)
    }

    async fn count_clients(&self) -> Result<u64, RepositoryError> {
        Ok(self.clients.lock().unwrap().len() as u64)
    }

    async fn count_clicks(&self) -> Result<u64, RepositoryError> {
        Ok(self.clicks.lock().unwrap().len() as u64)
    }

    async fn count_webhooks(&self) -> Result<u64, RepositoryError> {
        Ok(self.webhooks.lock().unwrap().len() as u64)
    }

    async fn recent_clicks(&self, limit: u64) -> Result<Vec<ClickModel>, RepositoryError> {
        Ok(self
            .clicks
            .lock()
            .unwrap()
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Dispatcher returning a fixed outcome and remembering what it was asked to send.
pub struct RecordingDispatcher {
    outcome: DispatchOutcome,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingDispatcher {
    pub fn new(outcome: DispatchOutcome) -> Self {
        Self {
            outcome,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsDispatcher for RecordingDispatcher {
    async fn send(&self, phone: &str, body: &str) -> DispatchOutcome {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), body.to_string()));
        self.outcome.clone()
    }
}
