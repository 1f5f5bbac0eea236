//! Encoding of response text into bytes.
//!
//! Only the charsets a web application realistically configures are known:
//! UTF-8, ISO-8859-1 and US-ASCII. Characters a single-byte charset cannot
//! represent are written as `?`.

use crate::error::{Error, Result};

enum Charset {
    Utf8,
    Latin1,
    Ascii,
}

fn lookup(name: &str) -> Option<Charset> {
    match name.trim().to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" => Some(Charset::Utf8),
        "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Some(Charset::Latin1),
        "us-ascii" | "ascii" => Some(Charset::Ascii),
        _ => None,
    }
}

pub fn is_supported(name: &str) -> bool {
    lookup(name).is_some()
}

pub fn encode(text: &str, name: &str) -> Result<Vec<u8>> {
    let max = match lookup(name) {
        Some(Charset::Utf8) => return Ok(text.as_bytes().to_vec()),
        Some(Charset::Latin1) => 0xFF,
        Some(Charset::Ascii) => 0x7F,
        None => return Err(Error::EncodingFailure(name.to_string())),
    };
    Ok(text
        .chars()
        .map(|c| if (c as u32) <= max { c as u8 } else { b'?' })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        assert_eq!(encode("héllo", "UTF-8").unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn latin1_is_single_byte() {
        assert_eq!(encode("héllo", "iso-8859-1").unwrap(), b"h\xe9llo");
        assert_eq!(encode("€", "latin1").unwrap(), b"?");
    }

    #[test]
    fn ascii_replaces_high_chars() {
        assert_eq!(encode("héllo", "us-ascii").unwrap(), b"h?llo");
    }

    #[test]
    fn unknown_charset_fails() {
        assert!(matches!(
            encode("x", "klingon-8"),
            Err(Error::EncodingFailure(name)) if name == "klingon-8"
        ));
        assert!(!is_supported("klingon-8"));
    }
}
