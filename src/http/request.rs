use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use async_std::io::{Read, ReadExt};
use base64::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::http::conditional;
use crate::http::content_type::parse_content_type;
use crate::http::cookie::{Cookie, CookieJar};
use crate::http::forwarded::ForwardedResolver;
use crate::http::headers::HttpHeaders;
use crate::http::negotiation::{self, Format};
use crate::http::{HttpMethod, http_method_from_str};

/// Request body as handed over by the transport.
pub type Body = Box<dyn Read + Send + Unpin>;

/// Fields extracted from the wire by the transport, before any derivation.
pub struct RawRequest {
    pub remote_address: String,
    pub method: String,
    pub path: String,
    pub query_string: String,
    pub content_type: Option<String>,
    pub body: Option<Body>,
    pub url: String,
    pub host: String,
    pub is_loopback: bool,
    pub port: u16,
    pub domain: String,
    pub secure: bool,
    pub headers: HttpHeaders,
    pub cookies: CookieJar,
}

impl RawRequest {
    /// A plain HTTP request to `localhost` from the loopback address.
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            remote_address: "127.0.0.1".to_string(),
            method: method.to_string(),
            path: path.to_string(),
            query_string: String::new(),
            content_type: None,
            body: None,
            url: path.to_string(),
            host: "localhost".to_string(),
            is_loopback: true,
            port: 80,
            domain: "localhost".to_string(),
            secure: false,
            headers: HttpHeaders::new(),
            cookies: CookieJar::new(),
        }
    }
}

/// Routing state filled in by the dispatch layer.
#[derive(Debug, Clone, Default)]
pub struct RouteState {
    /// Controller to invoke
    pub controller: Option<String>,
    pub action_method: Option<String>,
    /// Full action (ex: `Application.index`)
    pub action: Option<String>,
    /// Parameters extracted from the route
    pub route_args: HashMap<String, String>,
    pub resolved: bool,
}

/// Free space for request specific data, keyed by name.
#[derive(Default)]
pub struct Attributes {
    values: HashMap<String, Box<dyn Any + Send>>,
}

impl Attributes {
    pub fn insert<T: Any + Send>(&mut self, key: &str, value: T) {
        self.values.insert(key.to_string(), Box::new(value));
    }

    /// Value under `key`, if present and of type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.downcast_mut()
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

pub struct HttpRequest {
    /// Server host, possibly rewritten by a trusted proxy
    pub host: String,
    pub path: String,
    pub query_string: String,
    /// URL path (excluding scheme, host and port), starting with `/`
    pub url: String,
    pub method: HttpMethod,
    pub domain: String,
    /// Client address, possibly rewritten by a trusted proxy
    pub remote_address: String,
    pub content_type: String,
    /// Charset used to decode the body
    pub encoding: String,
    pub format: Option<Format>,
    pub port: u16,
    pub secure: bool,

    pub headers: HttpHeaders,
    pub cookies: CookieJar,
    body: Option<Body>,

    pub args: Attributes,
    /// When the request was received
    pub date: SystemTime,
    /// HTTP Basic user
    pub user: Option<String>,
    /// HTTP Basic password
    pub password: Option<String>,
    /// Request comes from the loopback interface
    pub is_loopback: bool,
    pub route: RouteState,
}

impl HttpRequest {
    /// Builds a fully derived request from transport fields.
    ///
    /// Derivation runs in a fixed order: content type, proxy trust, format,
    /// Basic credentials, then validation of the final `X-Forwarded-For`.
    /// Any failure aborts construction.
    pub fn create(raw: RawRequest, config: &Config) -> Result<Self> {
        let mut req = Self::from_raw(raw, config);
        ForwardedResolver::resolve(&mut req, config)?;
        req.resolve_format();
        req.authorization_init();
        ForwardedResolver::validate_forwarded_for(req.headers.get("x-forwarded-for"))?;
        Ok(req)
    }

    /// Copies transport fields and splits the content type; nothing else is
    /// derived.
    pub(crate) fn from_raw(raw: RawRequest, config: &Config) -> Self {
        let ct = parse_content_type(raw.content_type.as_deref());
        Self {
            host: raw.host,
            path: raw.path,
            query_string: raw.query_string,
            url: raw.url,
            method: http_method_from_str(&raw.method),
            domain: raw.domain,
            remote_address: raw.remote_address,
            content_type: ct.content_type,
            encoding: ct
                .encoding
                .unwrap_or_else(|| config.default_web_encoding.clone()),
            format: None,
            port: raw.port,
            secure: raw.secure,
            headers: raw.headers,
            cookies: raw.cookies,
            body: raw.body,
            args: Attributes::default(),
            date: SystemTime::now(),
            user: None,
            password: None,
            is_loopback: raw.is_loopback,
            route: RouteState::default(),
        }
    }

    /// Resolves the format from `Accept` unless it is already set.
    pub fn resolve_format(&mut self) {
        if self.format.is_some() {
            return;
        }
        self.format = negotiation::resolve_format(self.headers.value("accept"));
    }

    /// Format to render with; an unresolved format renders as html.
    pub fn format_or_html(&self) -> Format {
        self.format.unwrap_or(Format::Html)
    }

    fn authorization_init(&mut self) {
        let Some(data) = self
            .headers
            .value("authorization")
            .and_then(|v| v.strip_prefix("Basic "))
        else {
            return;
        };

        let decoded = match BASE64_STANDARD.decode(data.trim()) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                debug!("Ignoring malformed Basic credentials: {err}");
                return;
            }
        };

        // The password may itself contain ':'
        let Some((user, password)) = decoded.split_once(':') else {
            return;
        };
        self.user = (!user.is_empty()).then(|| user.to_string());
        self.password = (!password.is_empty()).then(|| password.to_string());
    }

    /// Sent by an Ajax framework (`X-Requested-With: XMLHttpRequest`).
    pub fn is_ajax(&self) -> bool {
        self.headers.value("x-requested-with") == Some("XMLHttpRequest")
    }

    /// Request base, protocol, domain and port (ex: `http://localhost:9000`).
    pub fn base(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        if self.port == 80 || self.port == 443 {
            format!("{}://{}", scheme, self.domain)
        } else {
            format!("{}://{}:{}", scheme, self.domain, self.port)
        }
    }

    /// Languages requested by the client, preferred first.
    pub fn accept_language(&self) -> Vec<String> {
        negotiation::accept_language(self.headers.value("accept-language"))
    }

    /// Whether the client copy identified by `etag` and `last_modified` must
    /// be regenerated. See [`conditional::is_modified`].
    pub fn is_modified(&self, etag: &str, last_modified: SystemTime) -> bool {
        conditional::is_modified(&self.headers, etag, last_modified)
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(Cookie::new(name, value));
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.set(&name.to_ascii_lowercase(), value);
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Hands the body stream out. Later calls return `None`.
    pub fn take_body(&mut self) -> Option<Body> {
        self.body.take()
    }

    /// Reads the whole body. Empty if there was none or it was already taken.
    pub async fn read_body(&mut self) -> std::io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        if let Some(mut body) = self.take_body() {
            body.read_to_end(&mut bytes).await?;
        }
        Ok(bytes)
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if !self.query_string.is_empty() {
            write!(f, "?{}", self.query_string)?;
        }
        Ok(())
    }
}
