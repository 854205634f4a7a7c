//! # Click Repository
//!
//! Append-only storage of tracking link visits.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::error::RepositoryError;
use crate::models::click::{
    ActiveModel as ClickActiveModel, Column as ClickColumn, Entity as Click, Model as ClickModel,
};

/// One observed visit, with the client fields copied at click time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClick {
    pub link_token: String,
    pub phone: String,
    pub name: String,
    pub national_id: String,
    pub source_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Repository for click database operations
#[derive(Debug, Clone)]
pub struct ClickRepository {
    db: Arc<DatabaseConnection>,
}

impl ClickRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert one click row. The caller is responsible for checking the token.
    pub async fn insert(&self, click: NewClick) -> Result<ClickModel, RepositoryError> {
        let active = ClickActiveModel {
            id: NotSet,
            link_token: Set(click.link_token),
            phone: Set(Some(click.phone)),
            name: Set(Some(click.name)),
            national_id: Set(Some(click.national_id)),
            source_address: Set(click.source_address),
            user_agent: Set(click.user_agent),
            clicked_at: Set(Utc::now().fixed_offset()),
        };

        active
            .insert(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn count(&self) -> Result<u64, RepositoryError> {
        Click::find()
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Most recent clicks first; equal timestamps fall back to insertion order.
    pub async fn recent(&self, limit: u64) -> Result<Vec<ClickModel>, RepositoryError> {
        Click::find()
            .order_by_desc(ClickColumn::ClickedAt)
            .order_by_desc(ClickColumn::Id)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
