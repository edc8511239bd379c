//! Request parameters: query string values and transport passthrough options.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

// == Query Value ==
/// A scalar query-string value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::Float(n) => write!(f, "{n}"),
            QueryValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

macro_rules! impl_query_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for QueryValue {
            fn from(value: $ty) -> Self {
                QueryValue::Int(i64::from(value))
            }
        })*
    };
}

impl_query_int!(i8, i16, i32, i64, u8, u16, u32);

// == Request Body ==
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(Vec<(String, String)>),
    Text(String),
    Bytes(Bytes),
}

// == Transport Options ==
/// Options handed to the transport verbatim; never part of the query string.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    /// Overrides the session-wide timeout for this call
    pub timeout: Option<Duration>,
}

// == Request Params ==
/// Everything a caller passes alongside method and URL.
///
/// Query parameters keep insertion order on the wire; the cache key sorts them.
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    pub query: Vec<(String, QueryValue)>,
    pub options: TransportOptions,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.options.headers.append(name, value);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.options.body = Some(RequestBody::Json(body));
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.options.body = Some(RequestBody::Form(fields));
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.options.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.options.body = Some(RequestBody::Bytes(body.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Query parameters rendered as strings, in insertion order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}
