//! In-memory model of an HTTP request and its response.
//!
//! The transport extracts raw fields from the wire into a
//! [`RawRequest`](http::request::RawRequest) and calls
//! [`HttpRequest::create`](http::request::HttpRequest::create), which derives
//! everything that must not be taken at face value:
//!
//! 1. content type and body charset,
//! 2. client address, host and scheme behind trusted proxies
//!    ([`forwarded`](http::forwarded)),
//! 3. the response format from `Accept` ([`negotiation`](http::negotiation)),
//! 4. HTTP Basic credentials,
//! 5. the final `X-Forwarded-For` grammar.
//!
//! Handlers then fill an [`HttpResponse`](http::response::HttpResponse)
//! (headers, cookies, cache validators, buffered or chunked body) which the
//! transport writes back. Both objects belong to the worker handling the
//! request; [`current`](http::current) binds them to that worker for code
//! that is not handed them explicitly.

pub mod config;
pub mod duration;
pub mod error;
pub mod handler;
pub mod http;

pub use config::Config;
pub use error::{Error, Result};
pub use http::current::Exchange;
pub use http::request::{HttpRequest, RawRequest};
pub use http::response::HttpResponse;
