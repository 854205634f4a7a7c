//! # Click Tracking Handler

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, RawQuery, Request, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::server::AppState;
use crate::tracking::ClickMetadata;

/// Query string of the tracking link
#[derive(Debug, Deserialize, IntoParams)]
pub struct ClickQuery {
    /// Tracking token from the SMS link
    pub id: Option<String>,
}

impl ClickQuery {
    /// Parse the raw query string. The first `id` wins when the key repeats.
    pub fn from_raw(query: Option<&str>) -> Self {
        let id = query.and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| *key == "id")
                .map(|(_, value)| value.into_owned())
        });
        Self { id }
    }
}

/// Record a visit to a tracking link and redirect the visitor
#[utoipa::path(
    get,
    path = "/clique",
    params(ClickQuery),
    responses(
        (status = 302, description = "Click recorded, redirecting to the landing page"),
        (status = 400, description = "Missing link id", body = ApiError),
        (status = 404, description = "Unknown link id", body = ApiError)
    ),
    tag = "tracking"
)]
pub async fn track_click(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    request: Request,
) -> Result<Response, ApiError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let metadata = click_metadata(request.headers(), peer);
    let query = ClickQuery::from_raw(query.as_deref());

    let target = state
        .clicks
        .track_click(query.id.as_deref(), metadata)
        .await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target.0)]).into_response())
}

/// Source address is the first `X-Forwarded-For` hop when a proxy supplied
/// one, otherwise the TCP peer.
fn click_metadata(headers: &HeaderMap, peer: Option<SocketAddr>) -> ClickMetadata {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(str::to_string);

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    ClickMetadata {
        source_address: forwarded.or_else(|| peer.map(|addr| addr.ip().to_string())),
        user_agent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        let metadata = click_metadata(&headers, Some(peer));

        assert_eq!(metadata.source_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(metadata.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_peer_address_fallback() {
        let peer: SocketAddr = "198.51.100.4:5123".parse().unwrap();
        let metadata = click_metadata(&HeaderMap::new(), Some(peer));

        assert_eq!(metadata.source_address.as_deref(), Some("198.51.100.4"));
        assert_eq!(metadata.user_agent, "");
    }

    #[test]
    fn test_query_takes_first_id() {
        let query = ClickQuery::from_raw(Some("id=abc&id=other"));
        assert_eq!(query.id.as_deref(), Some("abc"));

        let query = ClickQuery::from_raw(Some("utm=sms&id=a%2Db"));
        assert_eq!(query.id.as_deref(), Some("a-b"));

        assert_eq!(ClickQuery::from_raw(Some("foo=1")).id, None);
        assert_eq!(ClickQuery::from_raw(None).id, None);
    }

    #[test]
    fn test_no_address_available() {
        let metadata = click_metadata(&HeaderMap::new(), None);
        assert_eq!(metadata.source_address, None);
    }
}
