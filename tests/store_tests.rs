//! Integration tests for the database-backed tracking store.

mod test_utils;

use std::collections::HashSet;
use std::sync::Arc;

use kolmeya_tracker::config::AppConfig;
use kolmeya_tracker::db::{init_pool, init_schema};
use kolmeya_tracker::error::RepositoryError;
use kolmeya_tracker::models::webhook::RECEIVED_EVENT;
use kolmeya_tracker::links::LinkGenerator;
use kolmeya_tracker::repositories::{DbTrackingStore, NewClick, NewClient, TrackingStore};
use serde_json::json;
use tempfile::TempDir;
use test_utils::{setup_test_db, setup_test_store};

fn new_client(token: &str) -> NewClient {
    NewClient {
        phone: "5511999999999".to_string(),
        name: "Maria Souza".to_string(),
        national_id: "12345678900".to_string(),
        link_token: token.to_string(),
    }
}

fn new_click(token: &str) -> NewClick {
    NewClick {
        link_token: token.to_string(),
        phone: "5511999999999".to_string(),
        name: "Maria Souza".to_string(),
        national_id: "12345678900".to_string(),
        source_address: Some("203.0.113.1".to_string()),
        user_agent: Some("Mozilla/5.0".to_string()),
    }
}

#[tokio::test]
async fn test_create_and_find_client() {
    let store = setup_test_store().await.unwrap();

    let created = store.create_client(new_client("tok-a")).await.unwrap();
    assert_eq!(created.link_token, "tok-a");

    let found = store.find_client_by_token("tok-a").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Maria Souza");

    assert!(store.find_client_by_token("tok-b").await.unwrap().is_none());
}

#[tokio::test]
async fn test_same_identity_creates_separate_clients() {
    let store = setup_test_store().await.unwrap();

    let first = store.create_client(new_client("tok-1")).await.unwrap();
    let second = store.create_client(new_client("tok-2")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.count_clients().await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_token_is_rejected() {
    let store = setup_test_store().await.unwrap();

    store.create_client(new_client("tok-dup")).await.unwrap();
    let err = store.create_client(new_client("tok-dup")).await.unwrap_err();

    assert!(matches!(err, RepositoryError::Database(_)));
    assert_eq!(store.count_clients().await.unwrap(), 1);
}

#[tokio::test]
async fn test_click_requires_existing_client() {
    let store = setup_test_store().await.unwrap();

    let err = store.record_click(new_click("ghost")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
    assert_eq!(store.count_clicks().await.unwrap(), 0);
}

#[tokio::test]
async fn test_recent_clicks_newest_first_and_limited() {
    let store = setup_test_store().await.unwrap();
    store.create_client(new_client("tok-r")).await.unwrap();

    let mut ids = Vec::new();
    for _ in 0..12 {
        ids.push(store.record_click(new_click("tok-r")).await.unwrap().id);
    }

    let recent = store.recent_clicks(10).await.unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].id, *ids.last().unwrap());
    assert!(recent.windows(2).all(|pair| pair[0].clicked_at >= pair[1].clicked_at));
    assert_eq!(store.count_clicks().await.unwrap(), 12);
}

#[tokio::test]
async fn test_webhook_payload_round_trips_verbatim() {
    let store = setup_test_store().await.unwrap();
    let payload = json!({
        "evento": "sms_erro",
        "erro": "número inválido",
        "detalhes": {"tentativas": 2, "codigos": [1, 2]}
    });

    let stored = store.record_webhook(payload.clone()).await.unwrap();

    assert_eq!(stored.event, RECEIVED_EVENT);
    assert_eq!(stored.payload, payload);
    assert_eq!(store.count_webhooks().await.unwrap(), 1);
}

#[tokio::test]
async fn test_schema_init_is_repeatable_and_keeps_rows() {
    let db = Arc::new(setup_test_db().await.unwrap());
    let store = DbTrackingStore::new(Arc::clone(&db));
    store.create_client(new_client("tok-keep")).await.unwrap();

    init_schema(&db).await.unwrap();
    init_schema(&db).await.unwrap();

    assert_eq!(store.count_clients().await.unwrap(), 1);
    assert!(store.find_client_by_token("tok-keep").await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_on_pooled_file_database() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        database_url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("tracker.db").display()
        ),
        ..Default::default()
    };
    assert!(config.db_max_connections > 1);

    let db = init_pool(&config).await.unwrap();
    init_schema(&db).await.unwrap();
    let store = Arc::new(DbTrackingStore::new(Arc::new(db)));
    store.create_client(new_client("tok-hot")).await.unwrap();

    const CLICKS: usize = 100;
    const CLIENTS: usize = 8;
    let links = LinkGenerator::new("https://example.com");

    let click_tasks: Vec<_> = (0..CLICKS)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.record_click(new_click("tok-hot")).await })
        })
        .collect();
    let client_tasks: Vec<_> = (0..CLIENTS)
        .map(|_| {
            let store = Arc::clone(&store);
            let token = links.new_token();
            tokio::spawn(async move { store.create_client(new_client(&token)).await })
        })
        .collect();

    let mut click_ids = HashSet::new();
    for task in click_tasks {
        click_ids.insert(task.await.unwrap().unwrap().id);
    }
    let mut tokens = HashSet::new();
    for task in client_tasks {
        tokens.insert(task.await.unwrap().unwrap().link_token);
    }

    assert_eq!(click_ids.len(), CLICKS);
    assert_eq!(tokens.len(), CLIENTS);
    assert!(!tokens.contains("tok-hot"));
    assert_eq!(store.count_clicks().await.unwrap(), CLICKS as u64);
    assert_eq!(store.count_clients().await.unwrap(), CLIENTS as u64 + 1);
    for token in &tokens {
        assert!(store.find_client_by_token(token).await.unwrap().is_some());
    }
}
