//! # Respond - HTTP Response Rendering
//!
//! `respond` sits between application handlers and an HTTP response sink:
//! given a payload and a desired representation, it produces the correctly
//! framed, correctly content-typed response body. Six strategies are
//! provided - binary data, plain text, JSON, JSONP, XML and HTML templates
//! with layout composition.
//!
//! ## Core Concepts
//!
//! - [`Render`]: the per-process façade; owns the compiled template set and
//!   buffer pool, exposes one entry point per output format
//! - [`ResponseSink`]: the crate's view of the outbound response - headers,
//!   status, body, written in that order
//! - [`Options`]: construction-time configuration (template namespace,
//!   extensions, layout, charset, per-format flags)
//! - Layouts: an outer template wraps a content template's output at the
//!   `{{ yield() }}` extension point; `{{ current() }}` names the content
//!   template being wrapped
//!
//! ## Quick Start
//!
//! ```rust
//! use respond::{Options, Render, ResponseSink};
//!
//! struct Recorded {
//!     status: u16,
//!     headers: Vec<(String, String)>,
//!     body: Vec<u8>,
//! }
//!
//! impl ResponseSink for Recorded {
//!     fn header(&mut self, key: &str, value: &str) {
//!         self.headers.push((key.to_string(), value.to_string()));
//!     }
//!
//!     fn status(&mut self, code: u16) {
//!         self.status = code;
//!     }
//!
//!     fn write_body(&mut self, bytes: &[u8]) -> std::io::Result<()> {
//!         self.body.extend_from_slice(bytes);
//!         Ok(())
//!     }
//! }
//!
//! let render = Render::new(Options::default()).unwrap();
//! let mut rsp = Recorded { status: 0, headers: Vec::new(), body: Vec::new() };
//! render.json(&mut rsp, 200, &serde_json::json!({ "ok": true }));
//!
//! assert_eq!(rsp.status, 200);
//! assert_eq!(
//!     rsp.headers,
//!     vec![("Content-Type".to_string(), "application/json; charset=UTF-8".to_string())]
//! );
//! assert_eq!(rsp.body, br#"{"ok":true}"#);
//! ```
//!
//! ## HTML Templates and Layouts
//!
//! Templates are compiled once at construction from the configured
//! directory (default `templates/`, extension `.tmpl`) into a single named
//! set, keyed by relative path without extension. A layout invokes the
//! selected content template through `yield()`:
//!
//! ```text
//! templates/layout.tmpl:   <html><body>{{ yield() }}</body></html>
//! templates/pages/home.tmpl:  <h1>Hello {{ name }}</h1>
//! ```
//!
//! ```rust,ignore
//! let render = Render::new(Options {
//!     layout: Some("layout".to_string()),
//!     ..Default::default()
//! })?;
//!
//! // Writes <html><body><h1>Hello world</h1></body></html>
//! render.html(&mut rsp, 200, "pages/home", &context, None);
//! ```
//!
//! Set [`Options::development`] to recompile the set on every HTML render
//! while editing templates; in production, [`Render::reload`] swaps in a
//! freshly compiled set atomically.
//!
//! ## Error Handling
//!
//! A template that fails to parse aborts [`Render::new`]. Per-request
//! failures (encode errors, missing templates, `yield()` with no layout)
//! are converted into a written 500 `text/plain` response carrying the
//! failure's message - unless body bytes were already streamed, in which
//! case the failure is logged and the response left as-is. Buffered
//! strategies never start the body before encoding succeeds; streaming JSON
//! is the documented exception.

mod buffer;
mod engine;
mod error;
mod options;
mod render;
mod sink;
mod template;

// Buffer pool exports
pub use buffer::{BufferPool, PooledBuffer};

// Engine exports
pub use engine::{
    Data, Engine, Head, Html, Json, Jsonp, Text, Xml, CONTENT_BINARY, CONTENT_HTML, CONTENT_JSON,
    CONTENT_JSONP, CONTENT_TEXT, CONTENT_TYPE, CONTENT_XHTML, CONTENT_XML,
};

// Error type
pub use error::RenderError;

// Configuration exports
pub use options::{Delims, HelperBundle, HtmlOptions, Options};

// Façade export
pub use render::Render;

// Sink exports
pub use sink::{BodyWriter, ResponseSink};

// Template exports
pub use template::{AssetSource, TemplateSet};
