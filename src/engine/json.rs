//! JSON and JSONP strategies.

use serde::Serialize;

use crate::engine::{Engine, Head};
use crate::error::RenderError;
use crate::sink::{BodyWriter, ResponseSink};

/// Marshals the payload and writes the JSON response.
///
/// Buffered by default: the payload is fully serialized before the head is
/// written, so a serialization failure produces no response bytes. With
/// `streaming` set, the head is committed first and the encoder writes
/// incrementally to the sink; a mid-stream failure leaves a partial body
/// behind and is reported as [`RenderError::Partial`].
pub struct Json {
    pub head: Head,
    /// Multi-line, indented output.
    pub indent: bool,
    /// Bytes written between head and body.
    pub prefix: Option<Vec<u8>>,
    /// Leave `<`, `>` and `&` literal instead of `<`-escaping them.
    pub unescape_html: bool,
    /// Encode incrementally to the sink instead of buffering.
    pub streaming: bool,
}

impl<T: Serialize + ?Sized> Engine<T> for Json {
    fn render(&self, sink: &mut dyn ResponseSink, payload: &T) -> Result<(), RenderError> {
        if self.streaming {
            return self.render_streaming(sink, payload);
        }

        let mut body = if self.indent {
            serde_json::to_vec_pretty(payload)?
        } else {
            serde_json::to_vec(payload)?
        };
        if !self.unescape_html {
            body = escape_inline_script(&body);
        }

        self.head.write(sink);
        if let Some(prefix) = &self.prefix {
            sink.write_body(prefix).map_err(RenderError::partial)?;
        }
        sink.write_body(&body).map_err(RenderError::partial)?;
        Ok(())
    }
}

impl Json {
    /// Streams the encoded payload directly to the sink.
    ///
    /// The status code is already committed when encoding starts, so indent,
    /// prefix and escaping options do not apply and any failure is a
    /// [`RenderError::Partial`].
    fn render_streaming<T: Serialize + ?Sized>(
        &self,
        sink: &mut dyn ResponseSink,
        payload: &T,
    ) -> Result<(), RenderError> {
        self.head.write(sink);
        let mut writer = BodyWriter::new(sink);
        serde_json::to_writer(&mut writer, payload).map_err(RenderError::partial)?;
        Ok(())
    }
}

/// Marshals the payload and wraps it as `callback(<json>);`.
///
/// The callback name is taken verbatim from the caller; this layer does not
/// escape or validate it.
pub struct Jsonp {
    pub head: Head,
    /// Multi-line, indented output.
    pub indent: bool,
    /// Callback name wrapping the JSON body.
    pub callback: String,
}

impl<T: Serialize + ?Sized> Engine<T> for Jsonp {
    fn render(&self, sink: &mut dyn ResponseSink, payload: &T) -> Result<(), RenderError> {
        let body = if self.indent {
            serde_json::to_vec_pretty(payload)?
        } else {
            serde_json::to_vec(payload)?
        };

        self.head.write(sink);
        sink.write_body(self.callback.as_bytes())
            .map_err(RenderError::partial)?;
        sink.write_body(b"(").map_err(RenderError::partial)?;
        sink.write_body(&body).map_err(RenderError::partial)?;
        sink.write_body(b");").map_err(RenderError::partial)?;
        Ok(())
    }
}

/// Escapes `<`, `>` and `&` to their `\u00XX` forms for inline-script safety.
///
/// In valid JSON these bytes only occur inside string literals, where the
/// escape is an equivalent spelling, so a byte-level rewrite is safe.
fn escape_inline_script(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        match b {
            b'<' => out.extend_from_slice(b"\\u003c"),
            b'>' => out.extend_from_slice(b"\\u003e"),
            b'&' => out.extend_from_slice(b"\\u0026"),
            _ => out.push(b),
        }
    }
    out
}
