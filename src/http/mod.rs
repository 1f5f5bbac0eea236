use std::fmt;

pub mod charset;
pub mod chunked;
pub mod conditional;
pub mod content_type;
pub mod cookie;
pub mod current;
pub mod forwarded;
pub mod headers;
pub mod negotiation;
pub mod request;
pub mod response;
pub mod status;

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
    /// Any other token, upper-cased
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Other(m) => m.as_str(),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn http_method_from_str(method: &str) -> HttpMethod {
    let method = method.trim().to_ascii_uppercase();
    match method.as_str() {
        "GET" => HttpMethod::Get,
        "HEAD" => HttpMethod::Head,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        "TRACE" => HttpMethod::Trace,
        "OPTIONS" => HttpMethod::Options,
        "CONNECT" => HttpMethod::Connect,
        _ => HttpMethod::Other(method),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_are_case_insensitive() {
        assert_eq!(http_method_from_str("get"), HttpMethod::Get);
        assert_eq!(http_method_from_str("Patch"), HttpMethod::Patch);
    }

    #[test]
    fn unknown_methods_are_kept() {
        let m = http_method_from_str("propfind");
        assert_eq!(m, HttpMethod::Other("PROPFIND".into()));
        assert_eq!(m.to_string(), "PROPFIND");
    }
}
