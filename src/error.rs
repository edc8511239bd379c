//! Error types for the HTTP requester
//!
//! Provides unified error handling using thiserror.

use std::string::FromUtf8Error;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use thiserror::Error;

use crate::http::ResponseBody;

// == Request Error Enum ==
/// Unified error type for the requester.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The remote endpoint answered with a status outside `200..300`
    #[error(transparent)]
    Http(Box<HttpError>),

    /// No status line was received (connect, DNS, TLS or timeout failure)
    #[error("{method} {url} failed before a response was received: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body did not satisfy the content type it claimed
    #[error("Failed to decode {content_type} response body: {source}")]
    Decode {
        content_type: String,
        #[source]
        source: DecodeError,
    },

    /// Non-positive cache capacity, TTL or timeout
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The requester session was closed
    #[error("HTTP requester session is closed")]
    SessionClosed,
}

impl RequestError {
    /// Returns the HTTP error if this is a non-2xx failure.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            RequestError::Http(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the transport gave up because the call timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Transport { source, .. } if source.is_timeout())
    }
}

impl From<HttpError> for RequestError {
    fn from(err: HttpError) -> Self {
        RequestError::Http(Box::new(err))
    }
}

// == HTTP Error ==
/// A completed request whose status code was not a success.
///
/// Carries the response metadata and the decoded body so callers can branch on
/// specific codes or render the upstream message.
#[derive(Error, Debug, Clone)]
#[error("{method} {url} failed with HTTP status code {}.", .status.as_u16())]
pub struct HttpError {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    /// Canonical reason phrase, if the status code has one
    pub reason: Option<&'static str>,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

// == Decode Error ==
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

// == Result Type Alias ==
/// Convenience Result type for the requester.
pub type Result<T> = std::result::Result<T, RequestError>;
