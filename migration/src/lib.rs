//! Database migrations for the Kolmeya tracker.
//!
//! Every migration creates its objects with `IF NOT EXISTS`, so running the
//! migrator against an existing database is a no-op.

pub use sea_orm_migration::prelude::*;

mod m2025_01_01_000001_create_clients;
mod m2025_01_01_000002_create_clicks;
mod m2025_01_01_000003_create_webhooks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_01_000001_create_clients::Migration),
            Box::new(m2025_01_01_000002_create_clicks::Migration),
            Box::new(m2025_01_01_000003_create_webhooks::Migration),
        ]
    }
}
