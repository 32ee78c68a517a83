#![allow(dead_code)]

use std::io;

use respond::ResponseSink;

/// In-memory sink recording everything a render writes.
#[derive(Default)]
pub struct TestSink {
    pub headers: Vec<(String, String)>,
    pub status: Option<u16>,
    pub body: Vec<u8>,
    /// When set, every body write fails as if the peer hung up.
    pub fail_body_writes: bool,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == "Content-Type")
            .map(|(_, value)| value.as_str())
    }
}

impl ResponseSink for TestSink {
    fn header(&mut self, key: &str, value: &str) {
        self.headers.push((key.to_string(), value.to_string()));
    }

    fn status(&mut self, code: u16) {
        self.status = Some(code);
    }

    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_body_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        self.body.extend_from_slice(bytes);
        Ok(())
    }
}
