//! reqwest-backed IndexClient

use crate::error::{ClientError, ClientResult};
use crate::traits::{ContentType, IndexClient, IndexResponse};
use async_trait::async_trait;
use indexshift_core::Config;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

/// Connection settings for [`HttpIndexClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub address: String,
    pub timeout: Option<Duration>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl HttpConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            timeout: None,
            username: None,
            password: None,
        }
    }

    /// Connection settings from the loaded config
    pub fn from_config(config: &Config) -> Self {
        Self {
            address: config.address.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

/// HTTP client for a single search-engine cluster
#[derive(Debug)]
pub struct HttpIndexClient {
    base_url: String,
    http: reqwest::Client,
    username: Option<String>,
    password: Option<String>,
}

impl HttpIndexClient {
    /// Create a client from connection settings
    pub fn new(config: &HttpConfig) -> ClientResult<Self> {
        let base_url = normalize_address(&config.address)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url,
            http,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.username {
            Some(user) => req.basic_auth(user, self.password.as_ref()),
            None => req,
        }
    }

    async fn send(
        &self,
        method: &'static str,
        url: String,
        req: reqwest::RequestBuilder,
    ) -> ClientResult<IndexResponse> {
        log::debug!("{} {}", method, url);
        let transport = |e: reqwest::Error| ClientError::Transport {
            method,
            url: url.clone(),
            message: e.to_string(),
        };

        let resp = self
            .add_auth(req.header(ACCEPT, ContentType::Json.as_str()))
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(transport)?;
        log::debug!("{} {} -> {}", method, url, status);
        Ok(IndexResponse { status, body })
    }
}

/// Trim trailing slashes and check the scheme
fn normalize_address(address: &str) -> ClientResult<String> {
    let trimmed = address.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(h) if !h.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ClientError::InvalidAddress(address.to_string())),
    }
}

#[async_trait]
impl IndexClient for HttpIndexClient {
    async fn get(&self, path: &str) -> ClientResult<IndexResponse> {
        let url = self.url(path);
        let req = self.http.get(&url);
        self.send("GET", url, req).await
    }

    async fn put(&self, path: &str, body: &str) -> ClientResult<IndexResponse> {
        let url = self.url(path);
        let req = self
            .http
            .put(&url)
            .header(CONTENT_TYPE, ContentType::Json.as_str())
            .body(body.to_string());
        self.send("PUT", url, req).await
    }

    async fn post(
        &self,
        path: &str,
        body: &str,
        content_type: ContentType,
    ) -> ClientResult<IndexResponse> {
        let url = self.url(path);
        let req = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, content_type.as_str())
            .body(body.to_string());
        self.send("POST", url, req).await
    }

    fn address(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("http://localhost:9200/").unwrap(),
            "http://localhost:9200"
        );
        assert_eq!(
            normalize_address("https://es.internal").unwrap(),
            "https://es.internal"
        );
        assert!(normalize_address("localhost:9200").is_err());
        assert!(normalize_address("http://").is_err());
    }

    #[test]
    fn test_url_joins_path() {
        let client = HttpIndexClient::new(&HttpConfig::new("http://localhost:9200/")).unwrap();
        assert_eq!(client.url("_aliases"), "http://localhost:9200/_aliases");
        assert_eq!(
            client.url("/context-scope/_bulk"),
            "http://localhost:9200/context-scope/_bulk"
        );
        assert_eq!(client.address(), "http://localhost:9200");
    }

    #[test]
    fn test_http_config_from_config() {
        let config = Config {
            timeout_secs: Some(5),
            username: Some("elastic".to_string()),
            password: Some("pw".to_string()),
            ..Config::default()
        };
        let http = HttpConfig::from_config(&config);
        assert_eq!(http.address, "http://localhost:9200");
        assert_eq!(http.timeout, Some(Duration::from_secs(5)));
        assert_eq!(http.username.as_deref(), Some("elastic"));
    }
}
