//! Response sink abstraction.
//!
//! A [`ResponseSink`] is the crate's only view of the outbound HTTP response:
//! anything that accepts header pairs, a status code and body bytes. Framework
//! adapters implement this once; everything else in the crate writes through
//! it in a fixed order (headers, then status, then body).

use std::io;

/// Destination for one rendered response.
///
/// Implementations receive calls in this order and may rely on it:
///
/// 1. [`header`](Self::header) - zero or more header key/value pairs
/// 2. [`status`](Self::status) - the numeric status code, exactly once per
///    response (the error path may issue a second header/status sequence if
///    no body byte was written yet)
/// 3. [`write_body`](Self::write_body) - zero or more body chunks
pub trait ResponseSink {
    /// Sets a response header.
    fn header(&mut self, key: &str, value: &str);

    /// Sets the response status code.
    fn status(&mut self, code: u16);

    /// Appends bytes to the response body.
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// [`io::Write`] adapter over a sink's body channel.
///
/// Used by encoders that stream directly to the response instead of staging
/// output in a buffer first.
pub struct BodyWriter<'a> {
    sink: &'a mut dyn ResponseSink,
}

impl<'a> BodyWriter<'a> {
    /// Wraps a sink for incremental body writes.
    pub fn new(sink: &'a mut dyn ResponseSink) -> Self {
        Self { sink }
    }
}

impl io::Write for BodyWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_body(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
