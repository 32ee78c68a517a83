//! Output strategies.
//!
//! Each strategy implements the [`Engine`] capability: given a response sink
//! and a payload, write the content-type header and status code before any
//! body byte, produce the body, and return any encode failure to the caller
//! without writing an error response itself (that is the façade's job).
//!
//! Buffered strategies encode fully before touching the sink, so an encode
//! failure writes nothing. Streaming strategies commit the head first and
//! cannot offer that guarantee; their failures surface as
//! [`RenderError::Partial`](crate::RenderError::Partial).

mod data;
mod html;
mod json;
mod text;
mod xml;

pub use data::Data;
pub use html::Html;
pub use json::{Json, Jsonp};
pub use text::Text;
pub use xml::Xml;

use crate::error::RenderError;
use crate::sink::ResponseSink;

/// Content-Type value for binary data.
pub const CONTENT_BINARY: &str = "application/octet-stream";
/// Content-Type value for HTML.
pub const CONTENT_HTML: &str = "text/html";
/// Content-Type value for JSON.
pub const CONTENT_JSON: &str = "application/json";
/// Content-Type value for JSONP.
pub const CONTENT_JSONP: &str = "application/javascript";
/// Content-Type value for plain text.
pub const CONTENT_TEXT: &str = "text/plain";
/// Content-Type value for XHTML.
pub const CONTENT_XHTML: &str = "application/xhtml+xml";
/// Content-Type value for XML.
pub const CONTENT_XML: &str = "text/xml";

/// The Content-Type header key.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Response header descriptor: content type and status code.
///
/// Constructed fresh per call and written headers-then-status before any
/// body byte.
#[derive(Debug, Clone)]
pub struct Head {
    /// Full Content-Type value, charset suffix included.
    pub content_type: String,
    /// Numeric HTTP status code.
    pub status: u16,
}

impl Head {
    /// Writes the content-type header and status code to the sink.
    pub fn write(&self, sink: &mut dyn ResponseSink) {
        sink.header(CONTENT_TYPE, &self.content_type);
        sink.status(self.status);
    }
}

/// Uniform rendering capability over a payload of type `P`.
///
/// The payload type varies per strategy: raw bytes for [`Data`], a string
/// for [`Text`], any `Serialize` value for the rest. Dispatch is static;
/// the façade picks the strategy per entry point.
pub trait Engine<P: ?Sized> {
    /// Writes head and body for `payload` to the sink.
    fn render(&self, sink: &mut dyn ResponseSink, payload: &P) -> Result<(), RenderError>;
}
