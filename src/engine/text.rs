//! Plain text strategy.

use crate::engine::{Engine, Head};
use crate::error::RenderError;
use crate::sink::ResponseSink;

/// Writes the string payload verbatim as `text/plain`.
pub struct Text {
    pub head: Head,
}

impl Engine<str> for Text {
    fn render(&self, sink: &mut dyn ResponseSink, payload: &str) -> Result<(), RenderError> {
        self.head.write(sink);
        sink.write_body(payload.as_bytes())
            .map_err(RenderError::partial)?;
        Ok(())
    }
}
