//! HTTP seam of the status tracker

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::TrackerConfig;
use crate::errors::StatusError;

#[cfg(test)]
use mockall::automock;

/// Status code and raw body of an endpoint reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One outbound call per status check. Implementations must not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, StatusError>;

    async fn post_json(&self, url: &str, body: serde_json::Value) -> Result<HttpResponse, StatusError>;
}

/// `reqwest` backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_key: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(config: &TrackerConfig) -> Result<Self, StatusError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let api_key = config
            .api_key
            .clone()
            .map(|key| (config.api_key_header.clone(), key));
        Ok(HttpTransport { client, api_key })
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some((header, key)) => request.header(header.as_str(), key.as_str()),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<HttpResponse, StatusError> {
        let response = self.with_key(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Status endpoint replied {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl StatusTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, StatusError> {
        self.send(self.client.get(url)).await
    }

    async fn post_json(&self, url: &str, body: serde_json::Value) -> Result<HttpResponse, StatusError> {
        self.send(self.client.post(url).json(&body)).await
    }
}
