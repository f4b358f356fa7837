//! HTTP client for the GoRestaurant API.

use super::{FoodApi, FoodDto, OrderDto};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the server base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Override the per-request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP implementation of [`FoodApi`].
pub struct ApiClient {
    config: ApiConfig,
    http: Client,
}

impl ApiClient {
    /// Create a new API client. Every request is bounded by the configured
    /// timeout.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL of an API path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = Self::check_status(self.http.get(&url).send().await?)?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(%url, error = %e, "Response parse error");
            Error::malformed(e.to_string())
        })
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");

        Self::check_status(self.http.delete(&url).send().await?)?;
        Ok(())
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::warn!(
                url = %response.url(),
                status = status.as_u16(),
                "Request failed"
            );
            Err(Error::Http {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl FoodApi for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn favorites(&self) -> Result<Vec<FoodDto>> {
        self.get_json("favorites").await
    }

    #[tracing::instrument(skip(self))]
    async fn orders(&self) -> Result<Vec<OrderDto>> {
        self.get_json("orders").await
    }

    #[tracing::instrument(skip(self))]
    async fn order(&self, id: u64) -> Result<OrderDto> {
        self.get_json(&format!("orders/{}", id)).await
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_order(&self, id: u64) -> Result<()> {
        self.delete(&format!("orders/{}", id)).await
    }
}
