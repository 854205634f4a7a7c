//! # Server Configuration
//!
//! This module contains the router, shared state and listener setup for the
//! tracker API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers;
use crate::links::{CLICK_PATH, LinkGenerator};
use crate::repositories::{DbTrackingStore, TrackingStore};
use crate::sms::SmsDispatcher;
use crate::telemetry::trace_context_middleware;
use crate::tracking::{ClickTracker, SendOrchestrator, WebhookReceiver};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn TrackingStore>,
    pub sender: Arc<SendOrchestrator>,
    pub clicks: Arc<ClickTracker>,
    pub webhooks: Arc<WebhookReceiver>,
}

impl AppState {
    /// Wire the tracking services around one store and one dispatcher.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<dyn TrackingStore>,
        dispatcher: Arc<dyn SmsDispatcher>,
    ) -> Self {
        let links = LinkGenerator::new(config.public_base_url.as_str());
        Self {
            sender: Arc::new(SendOrchestrator::new(
                Arc::clone(&store),
                links,
                dispatcher,
            )),
            clicks: Arc::new(ClickTracker::new(
                Arc::clone(&store),
                config.click_redirect_url.as_str(),
            )),
            webhooks: Arc::new(WebhookReceiver::new(Arc::clone(&store))),
            store,
            config,
        }
    }
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/enviar-sms", post(handlers::sms::send_sms))
        .route(CLICK_PATH, get(handlers::clicks::track_click))
        .route("/webhook-kolmeya", post(handlers::webhooks::receive_webhook))
        .route("/dashboard", get(handlers::dashboard::dashboard))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(trace_context_middleware))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
    dispatcher: Arc<dyn SmsDispatcher>,
) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    let store: Arc<dyn TrackingStore> = Arc::new(DbTrackingStore::new(Arc::new(db)));
    let state = AppState::new(Arc::new(config), store, dispatcher);
    let profile = state.config.profile.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "Server listening");
    tracing::info!("Dashboard available at http://localhost:{}/dashboard", addr.port());

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::sms::send_sms,
        crate::handlers::clicks::track_click,
        crate::handlers::webhooks::receive_webhook,
        crate::handlers::dashboard::dashboard,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::types::SendSmsRequest,
            crate::handlers::types::SendSmsResponse,
            crate::handlers::types::SendSmsFailure,
            crate::handlers::types::WebhookResponse,
        )
    ),
    info(
        title = "Kolmeya Tracker API",
        description = "SMS dispatch with click tracking and Kolmeya webhook intake",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
