/// A `Content-Type` split into its mime type and optional charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeWithEncoding {
    pub content_type: String,
    pub encoding: Option<String>,
}

/// Splits a raw `Content-Type` value.
///
/// A missing value is read as `text/html` without charset. The mime type is
/// trimmed and lower-cased; only a `charset=` first parameter is honoured and
/// surrounding single or double quotes are removed from it.
pub fn parse_content_type(raw: Option<&str>) -> ContentTypeWithEncoding {
    let Some(raw) = raw else {
        return ContentTypeWithEncoding {
            content_type: "text/html".to_string(),
            encoding: None,
        };
    };

    let mut parts = raw.split(';');
    let content_type = parts.next().unwrap_or("").trim().to_ascii_lowercase();

    let encoding = parts.next().and_then(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim();
        let unquoted = ['"', '\'']
            .iter()
            .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
            .map(str::trim)
            .unwrap_or(value);
        (!unquoted.is_empty()).then(|| unquoted.to_string())
    });

    ContentTypeWithEncoding {
        content_type,
        encoding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_html() {
        let ct = parse_content_type(None);
        assert_eq!(ct.content_type, "text/html");
        assert_eq!(ct.encoding, None);
    }

    #[test]
    fn splits_charset() {
        let ct = parse_content_type(Some(" Application/JSON ; charset=ISO-8859-1"));
        assert_eq!(ct.content_type, "application/json");
        assert_eq!(ct.encoding.as_deref(), Some("ISO-8859-1"));
    }

    #[test]
    fn quoted_charset_is_unquoted() {
        let ct = parse_content_type(Some("text/plain; charset=\" utf-8 \""));
        assert_eq!(ct.encoding.as_deref(), Some("utf-8"));
        let ct = parse_content_type(Some("text/plain; charset='latin1'"));
        assert_eq!(ct.encoding.as_deref(), Some("latin1"));
    }

    #[test]
    fn other_parameters_are_ignored() {
        let ct = parse_content_type(Some("multipart/form-data; boundary=xyz"));
        assert_eq!(ct.content_type, "multipart/form-data");
        assert_eq!(ct.encoding, None);
    }
}
