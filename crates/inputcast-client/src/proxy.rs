//! Typed HTTP proxy for the server's command API.
//!
//! Each method mirrors one route: the proxy builds the URL from the shared
//! route constants, sends the request with a short timeout, and decodes the
//! [`ApiResult`] envelope. A failed envelope (`success == false`) is a
//! *successful* proxy call — the server answered — so it is returned to the
//! caller as-is; only transport-level problems become [`ProxyError`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use inputcast_core::{routes, ApiResult, ExecutionContext, InputConfiguration};

/// How long a proxy call waits for the server before giving up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Error type for proxy transport failures.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The request never produced a decodable envelope: connection refused,
    /// timeout, or a malformed response body.
    #[error("transport failure talking to the server: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A client-side handle to one server's command API.
#[derive(Debug, Clone)]
pub struct RemoteProxy {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteProxy {
    /// Builds a proxy for the server at `ip:port`.
    pub fn new(ip: &str, port: u16) -> Self {
        // The default client builder cannot fail for these options.
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: format!("http://{ip}:{port}"),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{route}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<ApiResult<T>, ProxyError> {
        let url = self.url(route);
        debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        Ok(response.json().await?)
    }

    async fn get_with_name<T: DeserializeOwned>(
        &self,
        route: &str,
        name: &str,
    ) -> Result<ApiResult<T>, ProxyError> {
        let url = self.url(route);
        debug!("GET {url}?name={name}");
        let response = self
            .client
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await?;
        Ok(response.json().await?)
    }

    async fn post<B, T>(&self, route: &str, body: &B) -> Result<ApiResult<T>, ProxyError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(route);
        debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        Ok(response.json().await?)
    }

    /// Names of every configuration loaded on the server.
    pub async fn all_configurations(&self) -> Result<ApiResult<Vec<String>>, ProxyError> {
        self.get(routes::ALL_CONFIGURATIONS).await
    }

    /// Names of every script loaded on the server.
    pub async fn all_scripts(&self) -> Result<ApiResult<Vec<String>>, ProxyError> {
        self.get(routes::ALL_SCRIPTS).await
    }

    /// One configuration by name.
    pub async fn configuration(
        &self,
        name: &str,
    ) -> Result<ApiResult<InputConfiguration>, ProxyError> {
        self.get_with_name(routes::CONFIGURATION, name).await
    }

    /// Persists `config` on the server.
    pub async fn save_configuration(
        &self,
        config: &InputConfiguration,
    ) -> Result<ApiResult<String>, ProxyError> {
        self.post(routes::SAVE, config).await
    }

    /// Removes the configuration named `name` from the server.
    pub async fn remove_configuration(&self, name: &str) -> Result<ApiResult<String>, ProxyError> {
        let url = self.url(routes::REMOVE_CONFIGURATION);
        debug!("POST {url}?name={name}");
        let response = self
            .client
            .post(&url)
            .query(&[("name", name)])
            .send()
            .await?;
        Ok(response.json().await?)
    }

    /// Asks the server to execute the action described by `context`.
    pub async fn execute(
        &self,
        context: &ExecutionContext,
    ) -> Result<ApiResult<String>, ProxyError> {
        self.post(routes::EXECUTE, context).await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
