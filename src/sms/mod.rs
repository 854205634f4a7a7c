//! SMS dispatch boundary.
//!
//! The tracking services only see [`SmsDispatcher`]; [`KolmeyaClient`] is the
//! production implementation talking to the Kolmeya HTTP API.

pub mod kolmeya;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

pub use kolmeya::KolmeyaClient;

/// Result of one send attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Provider accepted the message; carries its raw JSON response.
    Sent(JsonValue),
    /// Non-2xx status, transport failure, timeout or undecodable response.
    Failed(String),
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent(_))
    }
}

/// Capability to hand one message to the SMS provider.
///
/// Implementations never retry and never return an error: every failure is
/// reported as [`DispatchOutcome::Failed`].
#[async_trait]
pub trait SmsDispatcher: Send + Sync {
    async fn send(&self, phone: &str, body: &str) -> DispatchOutcome;
}
