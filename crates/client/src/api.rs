//! REST client for the dashboard layout-storage endpoints.
//!
//! Wraps the widget catalog, default-layout, create and patch endpoints
//! using [`reqwest`]. Every response is a `{success, data}` envelope.

use std::future::Future;

use medboard_core::types::LayoutId;
use medboard_core::wire::{ApiEnvelope, CreateLayout, CreatedLayout, PatchLayout};
use medboard_core::{Layout, PlacedWidget, WidgetCatalog};
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one layout-storage backend.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl DashboardApi {
    /// Create a client with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the widget catalog for the caller's enabled modules.
    ///
    /// Sends `GET /dashboard/widgets`. Retried on transient failures.
    pub async fn fetch_catalog(&self) -> Result<WidgetCatalog, ClientError> {
        let url = self.config.endpoint("dashboard/widgets");
        self.with_retry("fetch_catalog", || {
            let request = self.client.get(&url);
            async move {
                let response = request.send().await?;
                let envelope: ApiEnvelope<WidgetCatalog> = Self::parse_envelope(response).await?;
                envelope.data.ok_or(ClientError::MissingData("widget catalog"))
            }
        })
        .await
    }

    /// Fetch the caller's default layout, `None` when none is stored yet.
    ///
    /// Sends `GET /dashboard/layouts/default`. A `404` is treated the same
    /// as an empty payload. Retried on transient failures.
    pub async fn fetch_default_layout(&self) -> Result<Option<Layout>, ClientError> {
        let url = self.config.endpoint("dashboard/layouts/default");
        self.with_retry("fetch_default_layout", || {
            let request = self.client.get(&url);
            async move {
                let response = request.send().await?;
                if response.status() == StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                let envelope: ApiEnvelope<Layout> = Self::parse_envelope(response).await?;
                Ok(envelope.data)
            }
        })
        .await
    }

    /// Store a new layout and return the identifier assigned to it.
    ///
    /// Sends `POST /dashboard/layouts`. Never retried.
    pub async fn create_layout(&self, body: &CreateLayout) -> Result<LayoutId, ClientError> {
        let response = self
            .client
            .post(self.config.endpoint("dashboard/layouts"))
            .json(body)
            .send()
            .await?;

        let envelope: ApiEnvelope<CreatedLayout> = Self::parse_envelope(response).await?;
        envelope
            .data
            .map(|created| created.id)
            .ok_or(ClientError::MissingData("layout id"))
    }

    /// Replace the items of a stored layout.
    ///
    /// Sends `PATCH /dashboard/layouts/{id}` with only the `layout` field.
    /// Never retried.
    pub async fn patch_layout(&self, id: LayoutId, items: &[PlacedWidget]) -> Result<(), ClientError> {
        let body = PatchLayout {
            layout: items.to_vec(),
        };
        let response = self
            .client
            .patch(self.config.endpoint(&format!("dashboard/layouts/{id}")))
            .json(&body)
            .send()
            .await?;

        let _: ApiEnvelope<IgnoredAny> = Self::parse_envelope(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    /// Run an idempotent request, retrying transient failures with
    /// exponential backoff up to `max_retries` extra attempts.
    async fn with_retry<T, F, Fut>(&self, operation: &'static str, mut request: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            match request().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.config.max_retries && err.is_retryable() => {
                    let delay = self.config.retry_delay(attempt);
                    tracing::warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Dashboard API request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Check the status code, decode the envelope and reject
    /// `success: false` responses.
    async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiEnvelope<T>, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        if !envelope.success {
            return Err(ClientError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "no reason given".to_string()),
            ));
        }
        Ok(envelope)
    }
}
