//! Kolmeya HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, info};

use super::{DispatchOutcome, SmsDispatcher};
use crate::config::AppConfig;

const SEND_PATH: &str = "/sms/enviar";

/// Wire body of the send request.
#[derive(Debug, Serialize)]
struct SendSmsBody<'a> {
    telefone: &'a str,
    mensagem: &'a str,
}

/// Sends SMS through `POST {api_url}/sms/enviar` with bearer authentication.
#[derive(Debug, Clone)]
pub struct KolmeyaClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl KolmeyaClient {
    /// Build a client with a fixed per-request timeout.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let api_url = api_url.into();

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone().unwrap_or_default(),
            Duration::from_secs(config.sms_timeout_seconds),
        )
    }

    async fn try_send(&self, phone: &str, body: &str) -> Result<DispatchOutcome, reqwest::Error> {
        let response = self
            .http
            .post(format!("{}{}", self.api_url, SEND_PATH))
            .bearer_auth(&self.api_key)
            .json(&SendSmsBody {
                telefone: phone,
                mensagem: body,
            })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %text, "Kolmeya rejected SMS send");
            return Ok(DispatchOutcome::Failed(text));
        }

        if text.trim().is_empty() {
            return Ok(DispatchOutcome::Sent(JsonValue::Null));
        }

        match serde_json::from_str::<JsonValue>(&text) {
            Ok(json) => Ok(DispatchOutcome::Sent(json)),
            Err(err) => {
                error!(error = %err, body = %text, "Kolmeya returned an undecodable response");
                Ok(DispatchOutcome::Failed(format!(
                    "invalid provider response: {}",
                    err
                )))
            }
        }
    }
}

#[async_trait]
impl SmsDispatcher for KolmeyaClient {
    async fn send(&self, phone: &str, body: &str) -> DispatchOutcome {
        match self.try_send(phone, body).await {
            Ok(outcome) => {
                if outcome.is_sent() {
                    info!(phone = %phone, "SMS sent");
                }
                outcome
            }
            Err(err) => {
                error!(error = %err, phone = %phone, "SMS send failed");
                DispatchOutcome::Failed(err.to_string())
            }
        }
    }
}
