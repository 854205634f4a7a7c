//! Tracking workflow: sending SMS with a tracking link, recording clicks on
//! that link, and storing provider callbacks.

pub mod click;
pub mod send;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

use crate::error::RepositoryError;

pub use click::{ClickMetadata, ClickTracker, RedirectTarget};
pub use send::{SendOrchestrator, SendRequest, SendResult};
pub use webhook::{WebhookAck, WebhookEvent, WebhookReceiver};

/// Failures of the tracking operations.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Campo obrigatório não encontrado: {field}")]
    MissingField { field: &'static str },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Persistence(#[from] RepositoryError),
}
