//! # Webhook Repository

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, Set};
use serde_json::Value as JsonValue;

use crate::error::RepositoryError;
use crate::models::webhook::{
    ActiveModel as WebhookActiveModel, Entity as Webhook, Model as WebhookModel, RECEIVED_EVENT,
};

/// Repository for raw webhook payloads
#[derive(Debug, Clone)]
pub struct WebhookRepository {
    db: Arc<DatabaseConnection>,
}

impl WebhookRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Store `payload` verbatim under the constant received-event label.
    pub async fn insert(&self, payload: JsonValue) -> Result<WebhookModel, RepositoryError> {
        let active = WebhookActiveModel {
            id: NotSet,
            event: Set(RECEIVED_EVENT.to_string()),
            payload: Set(payload),
            received_at: Set(Utc::now().fixed_offset()),
        };

        active
            .insert(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Webhook::find()
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
