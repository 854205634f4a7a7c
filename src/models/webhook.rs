//! Webhook entity model
//!
//! Raw inbound provider callbacks, stored verbatim.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Label written to `event` for every stored callback.
pub const RECEIVED_EVENT: &str = "webhook_recebido";

/// Raw webhook payload received from the provider
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "webhooks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Constant label; the provider's own event type lives in `payload`
    pub event: String,

    /// Normalized payload exactly as received
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: JsonValue,

    pub received_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
