//! Click entity model
//!
//! Every resolved visit to a tracking link produces one row. Client fields are
//! copied at click time; `link_token` references `clients.link_token` without a
//! declared foreign key.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Recorded visit to a tracking link
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clicks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub link_token: String,

    pub phone: Option<String>,

    pub name: Option<String>,

    pub national_id: Option<String>,

    /// Originating network address of the visitor
    pub source_address: Option<String>,

    /// Raw `User-Agent` header
    pub user_agent: Option<String>,

    pub clicked_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
