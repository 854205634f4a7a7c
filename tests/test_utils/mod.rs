//! Test utilities for database and server testing.
//!
//! Provides in-memory SQLite databases with migrations applied and a helper
//! spawning the full application on a random local port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use kolmeya_tracker::config::AppConfig;
use kolmeya_tracker::repositories::{DbTrackingStore, TrackingStore};
use kolmeya_tracker::server::{AppState, create_app};
use kolmeya_tracker::sms::SmsDispatcher;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Sets up an in-memory SQLite database with all migrations applied.
///
/// The pool is pinned to one connection: every SQLite in-memory connection
/// would otherwise see its own empty database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Database-backed store over a fresh in-memory database.
pub async fn setup_test_store() -> Result<Arc<dyn TrackingStore>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(DbTrackingStore::new(Arc::new(db))))
}

/// Configuration used by server tests.
pub fn test_config() -> AppConfig {
    AppConfig {
        profile: "test".to_string(),
        public_base_url: "https://links.example.com".to_string(),
        click_redirect_url: "https://destino.example.com/".to_string(),
        ..Default::default()
    }
}

/// A running application instance.
pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
}

/// Serves the full router on `127.0.0.1:0` in a background task.
pub async fn spawn_app(config: AppConfig, dispatcher: Arc<dyn SmsDispatcher>) -> Result<TestServer> {
    let store = setup_test_store().await?;
    let state = AppState::new(Arc::new(config), store, dispatcher);
    let app = create_app(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .ok();
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        state,
    })
}

/// HTTP client that reports redirects instead of following them.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build reqwest client")
}
