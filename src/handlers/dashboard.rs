//! # Dashboard Handler

use axum::{extract::State, response::Html};

use crate::dashboard::{DashboardSnapshot, render};
use crate::error::ApiError;
use crate::server::AppState;

/// HTML page with totals, the latest clicks and a send test form
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html", body = String),
        (status = 500, description = "Storage failure", body = ApiError)
    ),
    tag = "dashboard"
)]
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let snapshot = DashboardSnapshot::load(state.store.as_ref()).await?;

    Ok(Html(render(&snapshot)))
}
