//! Binary data strategy.

use crate::engine::{Engine, Head};
use crate::error::RenderError;
use crate::sink::ResponseSink;

/// Writes the byte payload verbatim as `application/octet-stream`.
///
/// No charset suffix and no transformation.
pub struct Data {
    pub head: Head,
}

impl Engine<[u8]> for Data {
    fn render(&self, sink: &mut dyn ResponseSink, payload: &[u8]) -> Result<(), RenderError> {
        self.head.write(sink);
        sink.write_body(payload).map_err(RenderError::partial)?;
        Ok(())
    }
}
