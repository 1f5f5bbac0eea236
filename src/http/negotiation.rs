//! Content negotiation from `Accept` and `Accept-Language`.

use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical response formats a request can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Html,
    Xml,
    Txt,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Xml => "xml",
            Format::Txt => "txt",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a format from the raw `Accept` value, preferring
/// html > xml > txt > json.
///
/// Returns `None` when the header names none of the known types and has no
/// trailing wildcard.
pub fn resolve_format(accept: Option<&str>) -> Option<Format> {
    let Some(accept) = accept else {
        return Some(Format::Html);
    };

    if accept.contains("application/xhtml")
        || accept.contains("text/html")
        || accept.starts_with("*/*")
    {
        return Some(Format::Html);
    }
    if accept.contains("application/xml") || accept.contains("text/xml") {
        return Some(Format::Xml);
    }
    if accept.contains("text/plain") {
        return Some(Format::Txt);
    }
    if accept.contains("application/json") || accept.contains("text/javascript") {
        return Some(Format::Json);
    }
    if accept.ends_with("*/*") {
        return Some(Format::Html);
    }
    None
}

static QUALITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"q=([0-9.]+)").unwrap());

fn quality(entry: &str) -> f64 {
    match QUALITY.captures(entry) {
        Some(c) => c[1].parse().unwrap_or(0.0),
        None => 1.0,
    }
}

/// Languages from an `Accept-Language` value, preferred first.
///
/// Entries are ranked by descending `q` (1.0 when absent, 0 when unreadable);
/// equal weights keep the order the client sent them in.
pub fn accept_language(header: Option<&str>) -> Vec<String> {
    let Some(header) = header else {
        return Vec::new();
    };

    let mut ranked: Vec<(f64, &str)> = header
        .split(',')
        .map(|entry| (quality(entry), entry))
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .filter_map(|(_, entry)| {
            let tag = entry.trim().split(';').next().unwrap_or("").trim();
            (!tag.is_empty()).then(|| tag.to_string())
        })
        .collect()
}
