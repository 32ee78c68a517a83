//! The rendering façade.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::buffer::BufferPool;
use crate::engine::{
    Data, Engine, Head, Html, Json, Jsonp, Text, Xml, CONTENT_BINARY, CONTENT_HTML, CONTENT_JSON,
    CONTENT_JSONP, CONTENT_TEXT, CONTENT_TYPE, CONTENT_XML,
};
use crate::error::RenderError;
use crate::options::{HtmlOptions, Options};
use crate::sink::ResponseSink;
use crate::template::TemplateSet;

/// Idle buffers retained for staging rendered output.
const BUFFER_POOL_SIZE: usize = 64;

/// Service for writing JSON, XML, JSONP, text, binary data and HTML
/// templates out to an HTTP response sink.
///
/// Constructed once per process and shared across requests: the compiled
/// template set and buffer pool are safe for concurrent renders. Each entry
/// point converts a strategy failure into a written 500 `text/plain`
/// response rather than returning it, so handlers fire and forget.
pub struct Render {
    opt: Options,
    charset_suffix: String,
    templates: ArcSwap<TemplateSet>,
    pool: BufferPool,
}

impl Render {
    /// Constructs a new instance, compiling the template set eagerly.
    ///
    /// # Errors
    ///
    /// Fails if any template under the configured namespace does not parse.
    /// Serving with a partially-compiled set risks silently missing
    /// templates at request time, so construction aborts instead.
    pub fn new(mut opt: Options) -> Result<Self, RenderError> {
        opt.prepare();
        let charset_suffix = format!("; charset={}", opt.charset);
        let templates = TemplateSet::compile(&opt)?;

        Ok(Self {
            opt,
            charset_suffix,
            templates: ArcSwap::from_pointee(templates),
            pool: BufferPool::new(BUFFER_POOL_SIZE),
        })
    }

    /// Rebuilds the template set and swaps it in atomically.
    ///
    /// In-flight renders keep executing against the snapshot they loaded;
    /// the next render sees the new set. On failure the old set stays live.
    pub fn reload(&self) -> Result<(), RenderError> {
        let set = TemplateSet::compile(&self.opt)?;
        self.templates.store(Arc::new(set));
        Ok(())
    }

    /// Renders through an arbitrary [`Engine`], converting failures into a
    /// generic server-error response.
    ///
    /// This is the generic function behind every entry point and can be
    /// called with custom strategy implementations.
    pub fn render_with<P: ?Sized, E: Engine<P>>(
        &self,
        sink: &mut dyn ResponseSink,
        engine: &E,
        payload: &P,
    ) {
        if let Err(err) = engine.render(sink, payload) {
            if let RenderError::Partial(msg) = &err {
                // The body already started streaming; a second head would
                // corrupt the response further.
                tracing::error!(error = %msg, "render failed mid-stream, error response suppressed");
                return;
            }
            tracing::error!(error = %err, "render failed");
            self.error_response(sink, &err);
        }
    }

    /// Writes out the raw bytes as binary data.
    pub fn data(&self, sink: &mut dyn ResponseSink, status: u16, v: &[u8]) {
        let engine = Data {
            head: Head {
                content_type: CONTENT_BINARY.to_string(),
                status,
            },
        };
        self.render_with(sink, &engine, v);
    }

    /// Builds up the response from the named template and binding.
    ///
    /// A layout is selected from `html_opt` when given, else from the
    /// configured default; with a layout, the layout template executes with
    /// `yield()` bound to `name`. In development mode the whole template set
    /// is recompiled first, trading throughput for edit-reload convenience.
    pub fn html<T: Serialize + ?Sized>(
        &self,
        sink: &mut dyn ResponseSink,
        status: u16,
        name: &str,
        binding: &T,
        html_opt: Option<HtmlOptions>,
    ) {
        if self.opt.development {
            match TemplateSet::compile(&self.opt) {
                Ok(set) => self.templates.store(Arc::new(set)),
                Err(err) => {
                    tracing::error!(error = %err, "development-mode recompilation failed");
                    self.error_response(sink, &err);
                    return;
                }
            }
        }

        let layout = match html_opt {
            Some(opt) => opt.layout,
            None => self.opt.layout.clone(),
        };
        let content_type = self.opt.html_content_type.as_deref().unwrap_or(CONTENT_HTML);

        let engine = Html {
            head: Head {
                content_type: format!("{}{}", content_type, self.charset_suffix),
                status,
            },
            name: name.to_string(),
            layout,
            templates: self.templates.load_full(),
            pool: &self.pool,
        };
        self.render_with(sink, &engine, binding);
    }

    /// Marshals the given value and writes the JSON response.
    pub fn json<T: Serialize + ?Sized>(&self, sink: &mut dyn ResponseSink, status: u16, v: &T) {
        let engine = Json {
            head: Head {
                content_type: format!("{}{}", CONTENT_JSON, self.charset_suffix),
                status,
            },
            indent: self.opt.indent_json,
            prefix: self.opt.prefix_json.clone(),
            unescape_html: self.opt.unescape_html,
            streaming: self.opt.streaming_json,
        };
        self.render_with(sink, &engine, v);
    }

    /// Marshals the given value and writes it wrapped as `callback(...);`.
    pub fn jsonp<T: Serialize + ?Sized>(
        &self,
        sink: &mut dyn ResponseSink,
        status: u16,
        callback: &str,
        v: &T,
    ) {
        let engine = Jsonp {
            head: Head {
                content_type: format!("{}{}", CONTENT_JSONP, self.charset_suffix),
                status,
            },
            indent: self.opt.indent_json,
            callback: callback.to_string(),
        };
        self.render_with(sink, &engine, v);
    }

    /// Writes out a string as plain text.
    pub fn text(&self, sink: &mut dyn ResponseSink, status: u16, v: &str) {
        let engine = Text {
            head: Head {
                content_type: format!("{}{}", CONTENT_TEXT, self.charset_suffix),
                status,
            },
        };
        self.render_with(sink, &engine, v);
    }

    /// Marshals the given value and writes the XML response.
    pub fn xml<T: Serialize + ?Sized>(&self, sink: &mut dyn ResponseSink, status: u16, v: &T) {
        let engine = Xml {
            head: Head {
                content_type: format!("{}{}", CONTENT_XML, self.charset_suffix),
                status,
            },
            indent: self.opt.indent_xml,
            prefix: self.opt.prefix_xml.clone(),
        };
        self.render_with(sink, &engine, v);
    }

    fn error_response(&self, sink: &mut dyn ResponseSink, err: &RenderError) {
        sink.header(
            CONTENT_TYPE,
            &format!("{}{}", CONTENT_TEXT, self.charset_suffix),
        );
        sink.status(500);
        if let Err(io_err) = sink.write_body(err.to_string().as_bytes()) {
            tracing::error!(error = %io_err, "failed to write error response");
        }
    }
}
