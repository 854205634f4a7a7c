//! # Client Repository
//!
//! Inserts and looks up clients by their tracking token.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::error::RepositoryError;
use crate::models::client::{
    ActiveModel as ClientActiveModel, Column as ClientColumn, Entity as Client,
    Model as ClientModel,
};

/// Data required to register a client for one send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub phone: String,
    pub name: String,
    pub national_id: String,
    pub link_token: String,
}

/// Repository for client database operations
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: Arc<DatabaseConnection>,
}

impl ClientRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert one client row. Never deduplicates by phone or identity.
    pub async fn create(&self, client: NewClient) -> Result<ClientModel, RepositoryError> {
        let active = ClientActiveModel {
            id: NotSet,
            phone: Set(client.phone),
            name: Set(client.name),
            national_id: Set(client.national_id),
            link_token: Set(client.link_token),
            created_at: Set(Utc::now().fixed_offset()),
        };

        active
            .insert(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Find the client owning `token`, if any.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<ClientModel>, RepositoryError> {
        Client::find()
            .filter(ClientColumn::LinkToken.eq(token))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Client::find()
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
