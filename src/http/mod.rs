//! HTTP Module
//!
//! The caching requester and the pieces it is assembled from.
//!
//! # Components
//! - `transport` - one network round trip per call (reqwest)
//! - `serializer` - FIFO exclusive sections over the requester's state
//! - `requester` - cache lookup, fetch, classification and cache write
//! - `body`, `key`, `params` - decoding, cache keys and call parameters

mod body;
mod key;
mod params;
mod requester;
mod serializer;
mod transport;

pub use body::ResponseBody;
pub use key::cache_key;
pub use params::{QueryValue, RequestBody, RequestParams, TransportOptions};
pub use requester::CachedRequester;
pub use serializer::{ExclusiveSection, RequestSerializer};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
