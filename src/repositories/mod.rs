//! # Repository Layer
//!
//! Per-entity repositories wrapping SeaORM, and the [`TrackingStore`] trait the
//! tracking services depend on. [`DbTrackingStore`] is the database-backed
//! implementation; tests may substitute their own.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde_json::Value as JsonValue;

use crate::error::RepositoryError;
use crate::models::click::Model as ClickModel;
use crate::models::client::Model as ClientModel;
use crate::models::webhook::Model as WebhookModel;

mod click;
mod client;
mod webhook;

pub use click::{ClickRepository, NewClick};
pub use client::{ClientRepository, NewClient};
pub use webhook::WebhookRepository;

/// Storage contract for clients, clicks and webhook payloads.
///
/// Every write is a single-row insert; implementations must tolerate
/// concurrent callers.
#[async_trait]
pub trait TrackingStore: Send + Sync {
    /// Persist a new client. One row per call, even for repeated identities.
    async fn create_client(&self, client: NewClient) -> Result<ClientModel, RepositoryError>;

    async fn find_client_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ClientModel>, RepositoryError>;

    /// Persist a click. Fails with [`RepositoryError::NotFound`] when no client
    /// currently owns the token.
    async fn record_click(&self, click: NewClick) -> Result<ClickModel, RepositoryError>;

    async fn record_webhook(&self, payload: JsonValue) -> Result<WebhookModel, RepositoryError>;

    async fn count_clients(&self) -> Result<u64, RepositoryError>;

    async fn count_clicks(&self) -> Result<u64, RepositoryError>;

    async fn count_webhooks(&self) -> Result<u64, RepositoryError>;

    /// Up to `limit` clicks, most recent first.
    async fn recent_clicks(&self, limit: u64) -> Result<Vec<ClickModel>, RepositoryError>;
}

/// [`TrackingStore`] backed by a pooled SeaORM connection.
#[derive(Debug, Clone)]
pub struct DbTrackingStore {
    clients: ClientRepository,
    clicks: ClickRepository,
    webhooks: WebhookRepository,
}

impl DbTrackingStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            clients: ClientRepository::new(Arc::clone(&db)),
            clicks: ClickRepository::new(Arc::clone(&db)),
            webhooks: WebhookRepository::new(db),
        }
    }
}

#[async_trait]
impl TrackingStore for DbTrackingStore {
    async fn create_client(&self, client: NewClient) -> Result<ClientModel, RepositoryError> {
        self.clients.create(client).await
    }

    async fn find_client_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ClientModel>, RepositoryError> {
        self.clients.find_by_token(token).await
    }

    async fn record_click(&self, click: NewClick) -> Result<ClickModel, RepositoryError> {
        if self.clients.find_by_token(&click.link_token).await?.is_none() {
            return Err(RepositoryError::NotFound(format!(
                "no client for link token {}",
                click.link_token
            )));
        }

        self.clicks.insert(click).await
    }

    async fn record_webhook(&self, payload: JsonValue) -> Result<WebhookModel, RepositoryError> {
        self.webhooks.insert(payload).await
    }

    async fn count_clients(&self) -> Result<u64, RepositoryError> {
        self.clients.count().await
    }

    async fn count_clicks(&self) -> Result<u64, RepositoryError> {
        self.clicks.count().await
    }

    async fn count_webhooks(&self) -> Result<u64, RepositoryError> {
        self.webhooks.count().await
    }

    async fn recent_clicks(&self, limit: u64) -> Result<Vec<ClickModel>, RepositoryError> {
        self.clicks.recent(limit).await
    }
}
