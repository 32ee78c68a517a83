//! XML strategy.

use serde::Serialize;

use crate::engine::{Engine, Head};
use crate::error::RenderError;
use crate::sink::ResponseSink;

/// Marshals the payload and writes the XML response.
///
/// Buffered: the payload is fully serialized before the head is written.
pub struct Xml {
    pub head: Head,
    /// Multi-line, indented output.
    pub indent: bool,
    /// Bytes written between head and body.
    pub prefix: Option<Vec<u8>>,
}

impl<T: Serialize + ?Sized> Engine<T> for Xml {
    fn render(&self, sink: &mut dyn ResponseSink, payload: &T) -> Result<(), RenderError> {
        let mut body = String::new();
        if self.indent {
            let mut ser = quick_xml::se::Serializer::new(&mut body);
            ser.indent(' ', 2);
            payload.serialize(ser)?;
        } else {
            let ser = quick_xml::se::Serializer::new(&mut body);
            payload.serialize(ser)?;
        }

        self.head.write(sink);
        if let Some(prefix) = &self.prefix {
            sink.write_body(prefix).map_err(RenderError::partial)?;
        }
        sink.write_body(body.as_bytes())
            .map_err(RenderError::partial)?;
        Ok(())
    }
}
