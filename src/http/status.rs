//! Status codes used by request handlers.
//!
//! Statuses are carried as plain `u16` on [`HttpResponse`](crate::http::response::HttpResponse)
//! so handlers may answer with any code; the constants below cover the ones
//! the framework itself produces.

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const ACCEPTED: u16 = 202;
pub const PARTIAL_INFO: u16 = 203;
pub const NO_RESPONSE: u16 = 204;
pub const MOVED: u16 = 301;
pub const FOUND: u16 = 302;
pub const METHOD: u16 = 303;
pub const NOT_MODIFIED: u16 = 304;
pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const PAYMENT_REQUIRED: u16 = 402;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_ERROR: u16 = 500;
pub const NOT_IMPLEMENTED: u16 = 501;
pub const OVERLOADED: u16 = 502;
pub const GATEWAY_TIMEOUT: u16 = 503;

pub fn is_success(code: u16) -> bool {
    code / 100 == 2
}

pub fn is_redirect(code: u16) -> bool {
    code / 100 == 3
}

pub fn is_error(code: u16) -> bool {
    code / 100 == 4 || code / 100 == 5
}

pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        OK => "OK",                                 // 200
        CREATED => "Created",                       // 201
        ACCEPTED => "Accepted",                     // 202
        PARTIAL_INFO => "Non-Authoritative Information",
        NO_RESPONSE => "No Content",                // 204
        MOVED => "Moved Permanently",               // 301
        FOUND => "Found",                           // 302
        METHOD => "See Other",                      // 303
        NOT_MODIFIED => "Not Modified",             // 304

        BAD_REQUEST => "Bad Request",               // 400
        UNAUTHORIZED => "Unauthorized",             // 401
        PAYMENT_REQUIRED => "Payment Required",     // 402
        FORBIDDEN => "Forbidden",                   // 403
        NOT_FOUND => "Not Found",                   // 404

        INTERNAL_ERROR => "Internal Server Error",  // 500
        NOT_IMPLEMENTED => "Not Implemented",       // 501
        OVERLOADED => "Bad Gateway",                // 502
        GATEWAY_TIMEOUT => "Service Unavailable",   // 503
        _ => "",
    }
}
