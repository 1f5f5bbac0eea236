//! Pieces handlers use to produce a response: results that write themselves
//! onto an [`HttpResponse`](crate::http::response::HttpResponse), and the
//! boundaries with the template engine and the MIME table.

pub mod mime;
pub mod results;
pub mod templates;

pub use results::{ActionResult, RenderContext};
