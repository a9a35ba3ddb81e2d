//! Core client implementation

use crate::config::ClientConfig;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::session::{FileTokenStore, Session};
use crate::utils::retry::{RetryConfig, RetryPolicy};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// REST client for the Pergaminos API
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) session: Session,
    pub(crate) retry: RetryPolicy,
}

impl ApiClient {
    /// Create a client sending requests on behalf of `session`
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let base_url = normalize_base(&config.api.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout))
            .user_agent(config.api.user_agent.as_str())
            .build()
            .map_err(|e| SDKError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        let retry = RetryPolicy::new(RetryConfig::with_retries(
            config.api.max_retries,
            Duration::from_millis(config.api.retry_delay_ms),
        ));

        info!("ApiClient created for {}", base_url);

        Ok(Self {
            http,
            base_url,
            session,
            retry,
        })
    }

    /// Create a client whose session persists to `session.token_path`
    /// when configured, or lives in memory otherwise
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let session = match &config.session.token_path {
            Some(path) => Session::new(Arc::new(FileTokenStore::new(path))),
            None => Session::default(),
        };
        Self::new(config, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// API root, always ending in `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of an API route given as path segments, e.g.
    /// `["projects", id, "documents"]`. Each segment is percent-encoded, so
    /// ids never alter the route.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                SDKError::ConfigError(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a server supplied locator; absolute URLs pass through,
    /// paths are taken relative to the API host.
    pub fn resolve(&self, locator: &str) -> Result<Url> {
        self.base_url
            .join(locator)
            .map_err(|e| SDKError::Validation(format!("Invalid URL '{}': {}", locator, e)))
    }

    /// Request builder with the session credential attached
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match self.session.bearer() {
            Some(bearer) => builder.header(reqwest::header::AUTHORIZATION, bearer),
            None => builder,
        }
    }

    /// Send and map non-success statuses to [`SDKError`]
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("API error: {} - {}", status, body);
        Err(SDKError::from_status(status.as_u16(), &body))
    }

    /// Send and decode a JSON body
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.execute(builder)
            .await?
            .json()
            .await
            .map_err(|e| SDKError::ParseError(e.to_string()))
    }

    /// GET with the configured retry policy
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.retry
            .call(
                || self.send(self.request(Method::GET, url.clone())),
                SDKError::is_retryable,
            )
            .await
    }

    /// GET exactly once; the caller owns the failure
    pub(crate) async fn get_json_once<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::GET, url)).await
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::POST, url).json(body)).await
    }

    pub(crate) async fn put_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::PUT, url).json(body)).await
    }
}

fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| SDKError::ConfigError(format!("Invalid base URL '{}': {}", raw, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn transport_error(e: reqwest::Error) -> SDKError {
    if e.is_timeout() {
        SDKError::Timeout(e.to_string())
    } else {
        SDKError::NetworkError(e.to_string())
    }
}
