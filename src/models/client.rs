//! Client entity model
//!
//! One row per send request. The `link_token` is the opaque identifier carried
//! by the tracking link and is unique across all clients.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Client targeted by one SMS send
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Internal sequence identifier
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Destination phone number, provider format
    pub phone: String,

    pub name: String,

    /// National identity document (CPF), stored unvalidated
    pub national_id: String,

    /// Tracking token embedded in the outbound link
    #[sea_orm(unique)]
    pub link_token: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
