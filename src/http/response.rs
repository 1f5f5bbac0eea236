use std::fmt::Display;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::warn;

use crate::config::Config;
use crate::duration::parse_duration;
use crate::error::Result;
use crate::http::charset;
use crate::http::chunked::{Chunk, ChunkStream};
use crate::http::cookie::{CookieJar, SetCookie};
use crate::http::headers::HttpHeaders;
use crate::http::request::Body;
use crate::http::status;

/// Content sent verbatim by the transport instead of the buffered body.
pub enum Direct {
    File(PathBuf),
    Stream(Body),
}

pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub headers: HttpHeaders,
    pub cookies: CookieJar,
    /// Buffered body
    pub out: Vec<u8>,
    pub direct: Option<Direct>,
    /// Charset used when writing text
    pub encoding: String,
    stream: ChunkStream,
}

impl HttpResponse {
    pub fn new(config: &Config) -> Self {
        Self {
            status: status::OK,
            content_type: None,
            headers: HttpHeaders::new(),
            cookies: CookieJar::with_default_domain(config.default_cookie_domain.clone()),
            out: Vec::new(),
            direct: None,
            encoding: config.default_web_encoding.clone(),
            stream: ChunkStream::new(),
        }
    }

    /// First value of a header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.value(name)
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.set(name, value);
    }

    pub fn set_content_type_if_not_set(&mut self, content_type: &str) {
        if self.content_type.is_none() {
            self.content_type = Some(content_type.to_string());
        }
    }

    /// Session cookie on `/` with the default domain.
    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.set_cookie(SetCookie::new(name, value));
    }

    /// Cookie expiring after `duration` (ex: `3d`).
    pub fn set_cookie_for(&mut self, name: &str, value: &str, duration: &str) -> Result<()> {
        let args = SetCookie::new(name, value).expires_in(duration)?;
        self.cookies.set_cookie(args);
        Ok(())
    }

    pub fn set_cookie_with(&mut self, args: SetCookie) {
        self.cookies.set_cookie(args);
    }

    pub fn remove_cookie(&mut self, name: &str) {
        self.remove_cookie_at(name, "/");
    }

    pub fn remove_cookie_at(&mut self, name: &str, path: &str) {
        self.cookies.remove_cookie(name, path);
    }

    /// Adds `Cache-Control: max-age` for `duration` (ex: `3h`).
    pub fn cache_for(&mut self, duration: &str) -> Result<()> {
        let max_age = parse_duration(Some(duration))?;
        self.set_header("Cache-Control", &format!("max-age={max_age}"));
        Ok(())
    }

    /// Like [`cache_for`](Self::cache_for), also publishing the validators
    /// clients send back for conditional requests.
    pub fn cache_for_validated(
        &mut self,
        etag: &str,
        duration: &str,
        last_modified: SystemTime,
    ) -> Result<()> {
        self.cache_for(duration)?;
        self.set_header("Last-Modified", &httpdate::fmt_http_date(last_modified));
        self.set_header("Etag", etag);
        Ok(())
    }

    /// Headers allowing cross-domain requests from `allow_origin` (a comma
    /// separated list of origins, or `*`). `allow_methods` of `None` leaves
    /// methods unrestricted.
    pub fn access_control(
        &mut self,
        allow_origin: &str,
        allow_methods: Option<&str>,
        allow_credentials: bool,
    ) {
        self.set_header("Access-Control-Allow-Origin", allow_origin);
        if let Some(methods) = allow_methods {
            self.set_header("Access-Control-Allow-Methods", methods);
        }
        if allow_credentials {
            if allow_origin == "*" {
                warn!(
                    "Response.access_control: When the allowed domain is \"*\", \
                     Allow-Credentials is likely to be ignored by the browser."
                );
            }
            self.set_header("Access-Control-Allow-Credentials", "true");
        }
    }

    /// Appends `value` to the body, encoded with [`encoding`](Self::encoding).
    pub fn print(&mut self, value: impl Display) -> Result<()> {
        let bytes = charset::encode(&value.to_string(), &self.encoding)?;
        self.out.extend_from_slice(&bytes);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.out.clear();
    }

    pub fn chunked(&self) -> bool {
        self.stream.is_chunked()
    }

    /// Streams `chunk` to every registered sink. Fails when the transport
    /// registered none.
    pub fn write_chunk(&mut self, chunk: impl Into<Chunk>) -> Result<()> {
        self.stream.write_chunk(chunk)
    }

    pub fn on_write_chunk<F>(&mut self, sink: F)
    where
        F: FnMut(&Chunk) + Send + 'static,
    {
        self.stream.on_write_chunk(sink);
    }

    /// Status line and header block, terminated by the empty line.
    ///
    /// Error responses only carry cookies flagged `send_on_error`.
    pub fn build_head(&self) -> String {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status,
            status::reason_phrase(self.status)
        );

        if let Some(content_type) = &self.content_type {
            if !self.headers.contains("Content-Type") {
                head.push_str(&format!("Content-Type: {content_type}\r\n"));
            }
        }
        if self.chunked() {
            if !self.headers.contains("Transfer-Encoding") {
                head.push_str("Transfer-Encoding: chunked\r\n");
            }
        } else if self.direct.is_none() && !self.headers.contains("Content-Length") {
            head.push_str(&format!("Content-Length: {}\r\n", self.out.len()));
        }

        head.push_str(&self.headers.stringify());

        let error = status::is_error(self.status);
        for cookie in self.cookies.iter().filter(|c| !error || c.send_on_error) {
            head.push_str(&format!("Set-Cookie: {cookie}\r\n"));
        }

        head.push_str("\r\n");
        head
    }
}
