//! Transport Client
//!
//! Performs exactly one network round trip per call. No retries, no caching and
//! no interpretation of the status code; that is left to the requester.

use std::future::Future;

use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use tracing::debug;

use crate::config::Config;
use crate::error::{RequestError, Result};
use crate::http::{RequestBody, TransportOptions};

// == Transport Request ==
/// One outgoing call, with the query already rendered to strings.
#[derive(Debug)]
pub struct TransportRequest<'a> {
    pub method: &'a Method,
    pub url: &'a str,
    pub query: Vec<(String, String)>,
    pub options: &'a TransportOptions,
}

// == Transport Response ==
/// Status line, headers and the raw undecoded body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Final URL, including the rendered query string
    pub url: String,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

// == Transport Trait ==
/// Anything able to perform a single HTTP round trip.
pub trait Transport: Send + Sync + 'static {
    fn call(
        &self,
        request: TransportRequest<'_>,
    ) -> impl Future<Output = std::result::Result<TransportResponse, reqwest::Error>> + Send;
}

// == HTTP Transport ==
/// reqwest-backed transport owning one connection-pooling client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the pooled client with the configured timeout and user agent.
    ///
    /// `headers` are sent with every request and take precedence over the
    /// configured user agent.
    pub fn new(config: &Config, headers: HeaderMap) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| {
                RequestError::InvalidConfiguration(format!("failed to build HTTP client: {err}"))
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn call(
        &self,
        request: TransportRequest<'_>,
    ) -> std::result::Result<TransportResponse, reqwest::Error> {
        let options = request.options;
        let mut builder = self
            .client
            .request(request.method.clone(), request.url)
            .query(&request.query)
            .headers(options.headers.clone());

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &options.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Form(fields)) => builder.form(fields),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response.bytes().await?;

        debug!("{} {} received {} bytes", request.method, url, body.len());

        Ok(TransportResponse {
            status,
            headers,
            url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_http_transport_builds() {
        let mut headers = HeaderMap::new();
        headers.insert("x-bot", HeaderValue::from_static("sleepy"));

        assert!(HttpTransport::new(&Config::default(), headers).is_ok());
    }

    #[test]
    fn test_content_type_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let response = TransportResponse {
            status: StatusCode::OK,
            headers,
            url: "https://api.example.com/x".to_string(),
            body: Bytes::new(),
        };

        assert_eq!(response.content_type(), Some("text/plain"));
    }
}
