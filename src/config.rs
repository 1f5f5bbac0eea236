use serde::Deserialize;
use tracing::warn;

/// Settings consulted while deriving requests and building responses.
///
/// One instance is built at startup and handed by reference to
/// [`HttpRequest::create`](crate::http::request::HttpRequest::create) and
/// [`HttpResponse::new`](crate::http::response::HttpResponse::new).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Proxies allowed to send `X-Forwarded-*` headers: `ALL`, or addresses
    /// separated by commas or whitespace. Unset disables proxy support.
    pub forwarded_support: Option<String>,

    /// Replaces the request host for trusted proxied requests.
    pub forwarded_host: Option<String>,

    /// `https` forces every trusted proxied request to be secure.
    pub forwarded_proto: Option<String>,

    /// Re-derive domain and port when the host was rewritten.
    pub forwarded_overwrite_domain_and_port: bool,

    /// Domain given to cookies created without one.
    pub default_cookie_domain: Option<String>,

    /// Charset for request bodies without one, and for responses.
    pub default_web_encoding: String,
}

/// Outcome of reading [`Config::forwarded_support`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyTrust {
    Disabled,
    All,
    Only(Vec<String>),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            forwarded_support: None,
            forwarded_host: None,
            forwarded_proto: None,
            forwarded_overwrite_domain_and_port: false,
            default_cookie_domain: None,
            default_web_encoding: "utf-8".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Fail to read {}: {err}", path);
                warn!("Fall back to default config");
                return Config::default();
            }
        };

        Self::from_toml(&content).unwrap_or_else(|err| {
            warn!("Fail to deserialize config file {}: {err}", path);
            warn!("Fall back to default config");
            Config::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }

    pub fn proxy_trust(&self) -> ProxyTrust {
        match self.forwarded_support.as_deref() {
            None => ProxyTrust::Disabled,
            Some(v) if v.trim().eq_ignore_ascii_case("all") => ProxyTrust::All,
            Some(v) => ProxyTrust::Only(
                v.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}
