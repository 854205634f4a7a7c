//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the tracker API.

use crate::models::ServiceInfo;
use axum::response::Json;

pub mod clicks;
pub mod dashboard;
pub mod sms;
pub mod types;
pub mod webhooks;

/// Root handler listing the available endpoints
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    ),
    tag = "root"
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}
