use std::num::ParseIntError;

use thiserror::Error;

use crate::http::status;

/// Errors raised while building or mutating a request/response pair.
///
/// Construction errors ([`InvalidHeaderValue`](Error::InvalidHeaderValue),
/// [`AccessDenied`](Error::AccessDenied), [`NumberFormat`](Error::NumberFormat))
/// abort request creation; no partially derived request is ever returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unacceptable X-Forwarded-For format: {0}")]
    InvalidHeaderValue(String),

    #[error("this proxy request is not authorized: {0}")]
    AccessDenied(String),

    #[error("invalid port in forwarded host {host:?}")]
    NumberFormat {
        host: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    #[error("encoding problem: cannot encode output as {0:?}")]
    EncodingFailure(String),

    #[error("invalid duration {0:?}")]
    InvalidDuration(String),
}

impl Error {
    /// Status the transport should answer with when this error escapes.
    pub fn status(&self) -> u16 {
        match self {
            Error::InvalidHeaderValue(_) => status::BAD_REQUEST,
            Error::NumberFormat { .. } => status::BAD_REQUEST,
            Error::AccessDenied(_) => status::FORBIDDEN,
            _ => status::INTERNAL_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
