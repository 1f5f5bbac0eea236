//! Trust decisions over `X-Forwarded-*` headers.
//!
//! Behind a reverse proxy the transport only sees the proxy: its address,
//! the host it connected to and whether that hop was TLS. A proxy in the
//! allow-list may tell us the real values through forwarding headers; anyone
//! else sending them is refused.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::config::{Config, ProxyTrust};
use crate::error::{Error, Result};
use crate::http::headers::Header;
use crate::http::request::HttpRequest;

static FORWARDED_FOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s,\d.:/a-fA-F]*$").unwrap());

pub struct ForwardedResolver;

impl ForwardedResolver {
    /// Rewrites `host`, `remote_address` and `secure` from forwarding
    /// headers when the sending proxy is trusted, then re-derives domain and
    /// port if configured to.
    pub fn resolve(req: &mut HttpRequest, config: &Config) -> Result<()> {
        let original_host = req.host.clone();

        if let Some(forwarded_for) = req.headers.value("x-forwarded-for") {
            let forwarded_for = forwarded_for.to_string();
            match config.proxy_trust() {
                ProxyTrust::Disabled => {}
                trust => {
                    Self::check_proxy(&trust, &req.remote_address)?;
                    req.secure = req.secure || Self::is_request_secure(req, config);

                    if let Some(host) = &config.forwarded_host {
                        req.host = host.clone();
                    } else if let Some(host) = req.headers.value("x-forwarded-host") {
                        req.host = host.to_string();
                    }
                    req.remote_address = forwarded_for;
                }
            }
        }

        if config.forwarded_overwrite_domain_and_port && req.host != original_host {
            Self::overwrite_domain_and_port(req)?;
        }
        Ok(())
    }

    fn check_proxy(trust: &ProxyTrust, remote_address: &str) -> Result<()> {
        match trust {
            ProxyTrust::All => Ok(()),
            ProxyTrust::Only(allowed) if allowed.iter().any(|a| a == remote_address) => Ok(()),
            _ => {
                warn!("Refusing forwarded headers from untrusted proxy {remote_address}");
                Err(Error::AccessDenied(remote_address.to_string()))
            }
        }
    }

    fn is_request_secure(req: &HttpRequest, config: &Config) -> bool {
        let header_is = |name: &str, expected: &str| {
            req.headers
                .value(name)
                .is_some_and(|v| v.eq_ignore_ascii_case(expected))
        };

        config
            .forwarded_proto
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("https"))
            || header_is("x-forwarded-proto", "https")
            || header_is("x-forwarded-ssl", "on")
            // Sent by ISA Server and Squid as SSL front ends.
            || header_is("front-end-https", "on")
    }

    fn overwrite_domain_and_port(req: &mut HttpRequest) -> Result<()> {
        let mut parts = req.host.split(':');
        let domain = parts.next().unwrap_or("").to_string();
        match parts.next() {
            Some(port) => {
                req.port = port.parse::<u16>().map_err(|source| Error::NumberFormat {
                    host: req.host.clone(),
                    source,
                })?;
                req.domain = domain;
            }
            None => {
                req.port = 80;
                req.domain = req.host.clone();
            }
        }
        Ok(())
    }

    /// Checks an `X-Forwarded-For` value against the address token grammar
    /// (whitespace, digits, hex letters, `.`, `:`, `,` and `/`), rejecting
    /// anything that could smuggle other content through a forwarding chain.
    pub fn validate_forwarded_for(header: Option<&Header>) -> Result<()> {
        let Some(header) = header else {
            return Ok(());
        };
        if FORWARDED_FOR.is_match(header.value()) {
            Ok(())
        } else {
            Err(Error::InvalidHeaderValue(header.value().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::RawRequest;

    fn proxied(remote: &str, headers: &[(&str, &str)]) -> HttpRequest {
        let mut raw = RawRequest::new("GET", "/");
        raw.remote_address = remote.to_string();
        raw.host = "internal:9000".to_string();
        raw.domain = "internal".to_string();
        raw.port = 9000;
        for (k, v) in headers {
            raw.headers.add(k, v);
        }
        HttpRequest::from_raw(raw, &Config::default())
    }

    fn trusting(list: &str) -> Config {
        Config {
            forwarded_support: Some(list.to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn no_forwarded_for_is_a_no_op() {
        let mut req = proxied("10.0.0.1", &[("X-Forwarded-Host", "example.com")]);
        ForwardedResolver::resolve(&mut req, &trusting("ALL")).unwrap();
        assert_eq!(req.host, "internal:9000");
        assert_eq!(req.remote_address, "10.0.0.1");
        assert!(!req.secure);
    }

    #[test]
    fn disabled_trust_ignores_headers() {
        let mut req = proxied(
            "10.0.0.1",
            &[("X-Forwarded-For", "1.2.3.4"), ("X-Forwarded-Proto", "https")],
        );
        ForwardedResolver::resolve(&mut req, &Config::default()).unwrap();
        assert_eq!(req.remote_address, "10.0.0.1");
        assert!(!req.secure);
    }

    #[test]
    fn untrusted_proxy_is_denied() {
        let mut req = proxied("10.6.6.6", &[("X-Forwarded-For", "1.2.3.4")]);
        let err = ForwardedResolver::resolve(&mut req, &trusting("127.0.0.1, 10.0.0.1"))
            .unwrap_err();
        assert!(matches!(err, Error::AccessDenied(addr) if addr == "10.6.6.6"));
    }

    #[test]
    fn trusted_proxy_rewrites_identity() {
        let mut req = proxied(
            "10.0.0.1",
            &[
                ("X-Forwarded-For", "1.2.3.4"),
                ("X-Forwarded-Host", "example.com"),
                ("X-Forwarded-Proto", "HTTPS"),
            ],
        );
        ForwardedResolver::resolve(&mut req, &trusting("127.0.0.1 10.0.0.1")).unwrap();
        assert_eq!(req.remote_address, "1.2.3.4");
        assert_eq!(req.host, "example.com");
        assert!(req.secure);
        // domain/port untouched unless configured
        assert_eq!(req.port, 9000);
    }

    #[test]
    fn secure_markers() {
        for (name, value) in [("X-Forwarded-Ssl", "on"), ("Front-End-Https", "ON")] {
            let mut req = proxied("10.0.0.1", &[("X-Forwarded-For", "1.2.3.4"), (name, value)]);
            ForwardedResolver::resolve(&mut req, &trusting("ALL")).unwrap();
            assert!(req.secure, "{name} should mark the request secure");
        }

        let mut req = proxied("10.0.0.1", &[("X-Forwarded-For", "1.2.3.4")]);
        let mut cfg = trusting("ALL");
        cfg.forwarded_proto = Some("https".into());
        ForwardedResolver::resolve(&mut req, &cfg).unwrap();
        assert!(req.secure);
    }

    #[test]
    fn secure_is_never_lowered() {
        let mut req = proxied(
            "10.0.0.1",
            &[("X-Forwarded-For", "1.2.3.4"), ("X-Forwarded-Proto", "http")],
        );
        req.secure = true;
        ForwardedResolver::resolve(&mut req, &trusting("ALL")).unwrap();
        assert!(req.secure);
    }

    #[test]
    fn configured_host_wins_over_header() {
        let mut req = proxied(
            "10.0.0.1",
            &[("X-Forwarded-For", "1.2.3.4"), ("X-Forwarded-Host", "evil.com")],
        );
        let mut cfg = trusting("ALL");
        cfg.forwarded_host = Some("www.example.com".into());
        ForwardedResolver::resolve(&mut req, &cfg).unwrap();
        assert_eq!(req.host, "www.example.com");
    }

    #[test]
    fn overwrites_domain_and_port_from_new_host() {
        let mut cfg = trusting("ALL");
        cfg.forwarded_overwrite_domain_and_port = true;

        let mut req = proxied(
            "10.0.0.1",
            &[("X-Forwarded-For", "1.2.3.4"), ("X-Forwarded-Host", "example.com:8443")],
        );
        ForwardedResolver::resolve(&mut req, &cfg).unwrap();
        assert_eq!(req.domain, "example.com");
        assert_eq!(req.port, 8443);

        let mut req = proxied(
            "10.0.0.1",
            &[("X-Forwarded-For", "1.2.3.4"), ("X-Forwarded-Host", "example.com")],
        );
        ForwardedResolver::resolve(&mut req, &cfg).unwrap();
        assert_eq!(req.domain, "example.com");
        assert_eq!(req.port, 80);
    }

    #[test]
    fn malformed_port_propagates() {
        let mut cfg = trusting("ALL");
        cfg.forwarded_overwrite_domain_and_port = true;
        let mut req = proxied(
            "10.0.0.1",
            &[("X-Forwarded-For", "1.2.3.4"), ("X-Forwarded-Host", "example.com:http")],
        );
        let err = ForwardedResolver::resolve(&mut req, &cfg).unwrap_err();
        assert!(matches!(err, Error::NumberFormat { .. }));
    }

    #[test]
    fn forwarded_for_grammar() {
        let ok = Header::new("X-Forwarded-For", "203.0.113.7, 2001:db8::1, 10.0.0.0/8");
        assert!(ForwardedResolver::validate_forwarded_for(Some(&ok)).is_ok());
        assert!(ForwardedResolver::validate_forwarded_for(None).is_ok());

        let bad = Header::new("X-Forwarded-For", "1.2.3.4\r\nSet-Cookie: x=y");
        assert!(matches!(
            ForwardedResolver::validate_forwarded_for(Some(&bad)),
            Err(Error::InvalidHeaderValue(_))
        ));
        let bad = Header::new("X-Forwarded-For", "<script>");
        assert!(ForwardedResolver::validate_forwarded_for(Some(&bad)).is_err());
    }
}
