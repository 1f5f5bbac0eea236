//! Results a handler returns, each writing itself onto the response.

use tracing::error;

use crate::error::Result;
use crate::handler::mime::MimeTypes;
use crate::handler::templates::{Binding, RenderError, TemplateLoader};
use crate::http::negotiation::Format;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status;

/// Collaborators results render with.
pub struct RenderContext<'a> {
    pub templates: &'a dyn TemplateLoader,
    pub mime: &'a dyn MimeTypes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// Error page rendered from `errors/<status>.<format>`, or the bare
    /// reason when no template can be rendered.
    Error { status: u16, reason: String },
    /// `200 OK` with an XML document.
    RenderXml(String),
}

impl ActionResult {
    pub fn error(reason: &str) -> Self {
        Self::error_with_status(status::INTERNAL_ERROR, reason)
    }

    pub fn error_with_status(status: u16, reason: &str) -> Self {
        ActionResult::Error {
            status,
            reason: reason.to_string(),
        }
    }

    pub fn render_xml(xml: impl Into<String>) -> Self {
        ActionResult::RenderXml(xml.into())
    }

    pub fn apply(
        &self,
        req: &HttpRequest,
        res: &mut HttpResponse,
        ctx: &RenderContext<'_>,
    ) -> Result<()> {
        match self {
            ActionResult::Error { status, reason } => {
                apply_error(*status, reason, req, res, ctx)
            }
            ActionResult::RenderXml(xml) => {
                res.set_content_type_if_not_set("text/xml");
                res.print(xml)
            }
        }
    }
}

fn apply_error(
    status: u16,
    reason: &str,
    req: &HttpRequest,
    res: &mut HttpResponse,
    ctx: &RenderContext<'_>,
) -> Result<()> {
    res.status = status;

    let mut format = req.format_or_html();
    if req.is_ajax() && format == Format::Html {
        format = Format::Txt;
    }

    let content_type = ctx
        .mime
        .content_type(format.as_str())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    res.content_type = Some(if content_type.starts_with("text/") {
        format!("{content_type}; charset={}", res.encoding)
    } else {
        content_type
    });

    let mut binding = Binding::new();
    binding.insert("status".to_string(), status.to_string());
    binding.insert("reason".to_string(), reason.to_string());
    binding.insert("format".to_string(), format.to_string());
    binding.insert("request".to_string(), req.to_string());

    let template_path = format!("errors/{status}.{format}");
    let body = match ctx.templates.render(&template_path, &binding) {
        Ok(body) => body,
        Err(RenderError::NotFound(_)) => reason.to_string(),
        Err(err) => {
            error!("Failed to render {template_path}: {err}");
            reason.to_string()
        }
    };

    res.print(body)
}
