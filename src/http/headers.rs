//! HTTP headers abstraction for [`HttpRequest`](crate::http::request::HttpRequest) and
//! [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Headers are stored in an ordered map keyed by the lower-cased header name,
//! so every lookup is case-insensitive. A header may legally repeat, hence
//! each entry keeps an ordered, never empty list of values; [`Header::value`]
//! returns the first one.
//!
//! The name as it was first given is kept alongside the values, so response
//! headers serialize with the casing the handler chose.
//!
//! This abstraction does not enforce any HTTP semantics. Higher-level types
//! apply their own rules on top of it.

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    values: Vec<String>,
}

impl Header {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            values: vec![value.to_string()],
        }
    }

    /// Builds a header from several values. Returns `None` when `values` is
    /// empty.
    pub fn with_values(name: &str, values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value
    pub fn value(&self) -> &str {
        &self.values[0]
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpHeaders {
    headers: IndexMap<String, Header>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Replaces every value of `name` with `value`.
    pub fn set(&mut self, name: &str, value: &str) {
        self.headers
            .insert(name.to_ascii_lowercase(), Header::new(name, value));
    }

    /// Appends `value` to `name`, creating the header if needed.
    pub fn add(&mut self, name: &str, value: &str) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|h| h.values.push(value.to_string()))
            .or_insert_with(|| Header::new(name, value));
    }

    pub fn insert(&mut self, header: Header) {
        self.headers.insert(header.name.to_ascii_lowercase(), header);
    }

    pub fn get(&self, name: &str) -> Option<&Header> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// First value of `name`, if present.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(Header::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    pub fn remove(&mut self, name: &str) -> Option<Header> {
        self.headers.shift_remove(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Iterates `(lower-cased key, header)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Header)> {
        self.headers.iter().map(|(k, h)| (k.as_str(), h))
    }

    /// Renders every value as its own `Name: value\r\n` line.
    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for header in self.headers.values() {
            for value in &header.values {
                result.push_str(&format!("{}: {}\r\n", header.name, value));
            }
        }
        result
    }
}

impl FromIterator<(String, String)> for HttpHeaders {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut headers = HttpHeaders::new();
        for (name, value) in iter {
            headers.add(&name, &value);
        }
        headers
    }
}
