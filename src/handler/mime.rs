/// Maps a format token (`html`, `json`, ...) to a content type.
pub trait MimeTypes {
    fn content_type(&self, format: &str) -> Option<String>;
}

/// Table of the common web types, looked up by file extension.
pub struct BuiltinMimeTypes;

impl MimeTypes for BuiltinMimeTypes {
    fn content_type(&self, format: &str) -> Option<String> {
        guess_mime(&format!("xx.{format}")).map(str::to_string)
    }
}

pub fn guess_mime(path: &str) -> Option<&'static str> {
    let mime = match path.rsplit('.').next()? {
        "htm" | "html" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "json" => "application/json",
        "xml" => "text/xml",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}
