//! Click tracking: resolve a token, record the visit, redirect.

use std::sync::Arc;

use tracing::info;

use super::TrackingError;
use crate::error::RepositoryError;
use crate::repositories::{NewClick, TrackingStore};

/// Request metadata captured with each click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMetadata {
    pub source_address: Option<String>,
    /// Raw `User-Agent` header, empty when absent.
    pub user_agent: String,
}

/// Where the visitor is sent after a recorded click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(pub String);

/// Records every visit to a tracking link. Repeated visits are never
/// suppressed.
pub struct ClickTracker {
    store: Arc<dyn TrackingStore>,
    redirect_url: String,
}

impl ClickTracker {
    pub fn new(store: Arc<dyn TrackingStore>, redirect_url: impl Into<String>) -> Self {
        Self {
            store,
            redirect_url: redirect_url.into(),
        }
    }

    pub async fn track_click(
        &self,
        token: Option<&str>,
        metadata: ClickMetadata,
    ) -> Result<RedirectTarget, TrackingError> {
        let token = token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| TrackingError::Validation("ID do link não fornecido".to_string()))?;

        let client = self
            .store
            .find_client_by_token(token)
            .await?
            .ok_or_else(client_not_found)?;

        self.store
            .record_click(NewClick {
                link_token: client.link_token.clone(),
                phone: client.phone,
                name: client.name.clone(),
                national_id: client.national_id.clone(),
                source_address: metadata.source_address,
                user_agent: Some(metadata.user_agent),
            })
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => client_not_found(),
                other => TrackingError::Persistence(other),
            })?;

        info!(
            link_id = %client.link_token,
            nome = %client.name,
            cpf = %client.national_id,
            "Click recorded"
        );

        Ok(RedirectTarget(self.redirect_url.clone()))
    }
}

fn client_not_found() -> TrackingError {
    TrackingError::NotFound("Cliente não encontrado".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::NewClient;
    use crate::tracking::test_support::MemoryStore;

    fn tracker(store: Arc<MemoryStore>) -> ClickTracker {
        ClickTracker::new(store, "https://destino.test/")
    }

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::default());
        store
            .create_client(NewClient {
                phone: "5511999999999".to_string(),
                name: "Maria".to_string(),
                national_id: "12345678900".to_string(),
                link_token: "tok-1".to_string(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_known_token_records_click_and_redirects() {
        let store = seeded_store().await;
        let metadata = ClickMetadata {
            source_address: Some("203.0.113.7".to_string()),
            user_agent: "curl/8.0".to_string(),
        };

        let target = tracker(Arc::clone(&store))
            .track_click(Some("tok-1"), metadata)
            .await
            .unwrap();

        assert_eq!(target, RedirectTarget("https://destino.test/".to_string()));
        let clicks = store.recent_clicks(10).await.unwrap();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].name.as_deref(), Some("Maria"));
        assert_eq!(clicks[0].source_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(clicks[0].user_agent.as_deref(), Some("curl/8.0"));
    }

    #[tokio::test]
    async fn test_repeated_clicks_are_all_recorded() {
        let store = seeded_store().await;
        let tracker = tracker(Arc::clone(&store));
        for _ in 0..3 {
            tracker
                .track_click(Some("tok-1"), ClickMetadata::default())
                .await
                .unwrap();
        }
        assert_eq!(store.count_clicks().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_or_empty_token_is_rejected() {
        let store = seeded_store().await;
        let tracker = tracker(Arc::clone(&store));

        for token in [None, Some("")] {
            let err = tracker
                .track_click(token, ClickMetadata::default())
                .await
                .unwrap_err();
            assert!(matches!(err, TrackingError::Validation(ref m) if m == "ID do link não fornecido"));
        }
        assert_eq!(store.count_clicks().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let store = seeded_store().await;
        let err = tracker(Arc::clone(&store))
            .track_click(Some("nope"), ClickMetadata::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TrackingError::NotFound(ref m) if m == "Cliente não encontrado"));
        assert_eq!(store.count_clicks().await.unwrap(), 0);
    }
}
