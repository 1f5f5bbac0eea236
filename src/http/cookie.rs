//! Cookies and the name-keyed jar holding them.
//!
//! A cookie slot is identified by its name, path and domain. Setting a cookie
//! whose slot already exists updates it in place: value, max-age and secure
//! change, while `http_only`, path and domain keep what the slot was created
//! with. Anything else replaces the jar entry for that name.

use std::fmt;

use indexmap::IndexMap;

use crate::duration::parse_duration;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub domain: Option<String>,
    pub path: String,
    /// Seconds; `None` makes a session cookie.
    pub max_age: Option<i64>,
    pub secure: bool,
    pub http_only: bool,
    /// Keep the cookie on error responses.
    pub send_on_error: bool,
}

impl Cookie {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: None,
            path: "/".to_string(),
            max_age: None,
            secure: false,
            http_only: false,
            send_on_error: false,
        }
    }
}

/// Renders the cookie as a `Set-Cookie` header value.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, self.value, self.path)?;
        if let Some(domain) = &self.domain {
            write!(f, "; Domain={domain}")?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={max_age}")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        Ok(())
    }
}

/// Arguments of [`CookieJar::set_cookie`].
#[derive(Debug, Clone)]
pub struct SetCookie {
    name: String,
    value: String,
    domain: Option<String>,
    path: String,
    max_age: Option<i64>,
    secure: bool,
    http_only: bool,
}

impl SetCookie {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: None,
            path: "/".to_string(),
            max_age: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Max-age from a human duration such as `3d`.
    pub fn expires_in(self, duration: &str) -> Result<Self> {
        let seconds = parse_duration(Some(duration))?;
        Ok(self.max_age(i64::try_from(seconds).unwrap_or(i64::MAX)))
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: IndexMap<String, Cookie>,
    default_domain: Option<String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar giving `domain` to cookies created without one, so they are
    /// shared across subdomains.
    pub fn with_default_domain(domain: Option<String>) -> Self {
        Self {
            cookies: IndexMap::new(),
            default_domain: domain,
        }
    }

    pub fn default_domain(&self) -> Option<&str> {
        self.default_domain.as_deref()
    }

    /// Stores `cookie` under its name as is, replacing any previous entry.
    pub fn insert(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie);
    }

    pub fn set_cookie(&mut self, args: SetCookie) {
        if let Some(existing) = self.cookies.get_mut(&args.name) {
            // The requested domain is compared raw: a slot created without
            // domain holds the default one and only matches it explicitly.
            if existing.path == args.path && existing.domain == args.domain {
                existing.value = args.value;
                existing.max_age = args.max_age;
                existing.secure = args.secure;
                return;
            }
        }

        let cookie = Cookie {
            domain: args.domain.or_else(|| self.default_domain.clone()),
            name: args.name,
            value: args.value,
            path: args.path,
            max_age: args.max_age,
            secure: args.secure,
            http_only: args.http_only,
            send_on_error: false,
        };
        self.insert(cookie);
    }

    /// Expires the cookie `name` at `path` on the client.
    pub fn remove_cookie(&mut self, name: &str, path: &str) {
        self.set_cookie(SetCookie::new(name, "").path(path).max_age(0));
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cookie> {
        self.cookies.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.values()
    }
}

impl FromIterator<Cookie> for CookieJar {
    fn from_iter<T: IntoIterator<Item = Cookie>>(iter: T) -> Self {
        let mut jar = CookieJar::new();
        for cookie in iter {
            jar.insert(cookie);
        }
        jar
    }
}
