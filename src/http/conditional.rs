//! Conditional GET: deciding whether the client copy is still fresh.

use std::time::{Duration, SystemTime};

use tracing::error;

use crate::http::headers::HttpHeaders;

/// Returns `true` when the resource must be regenerated, `false` when a
/// `304 Not Modified` is enough.
///
/// Both `If-None-Match` and `If-Modified-Since` must be present for the
/// client copy to count as fresh: an ETag match alone is never trusted
/// without a date. With both present, the ETag must equal `etag` exactly and
/// the client date must not be older than `last_modified`. A date that does
/// not parse counts as modified. HTTP dates carry whole seconds, so
/// `last_modified` is compared without its sub-second part.
pub fn is_modified(headers: &HttpHeaders, etag: &str, last_modified: SystemTime) -> bool {
    let (Some(client_etag), Some(client_date)) = (
        headers.value("if-none-match"),
        headers.value("if-modified-since"),
    ) else {
        return true;
    };

    if client_etag != etag {
        return true;
    }

    match httpdate::parse_http_date(client_date) {
        Ok(date) => date < whole_seconds(last_modified),
        Err(err) => {
            error!("Can't parse date {client_date:?}: {err}");
            true
        }
    }
}

fn whole_seconds(time: SystemTime) -> SystemTime {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(since) => SystemTime::UNIX_EPOCH + Duration::from_secs(since.as_secs()),
        Err(_) => time,
    }
}
