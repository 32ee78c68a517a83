//! HTML template strategy.

use std::sync::Arc;

use minijinja::Value;
use serde::Serialize;

use crate::buffer::BufferPool;
use crate::engine::{Engine, Head};
use crate::error::RenderError;
use crate::sink::ResponseSink;
use crate::template::TemplateSet;

/// Executes a named template, optionally wrapped in a layout.
///
/// When a layout is selected, `yield()` and `current()` are bound for the
/// requested content template on a derived environment and the layout is
/// executed instead. Execution goes into a pooled buffer first; the buffer
/// is copied to the sink only after the template fully succeeds, so an
/// execution failure mid-template never produces a truncated body.
pub struct Html<'a> {
    pub head: Head,
    /// Content template name.
    pub name: String,
    /// Layout template name wrapping the content, if any.
    pub layout: Option<String>,
    /// The compiled set to execute against.
    pub templates: Arc<TemplateSet>,
    /// Staging buffers shared across renders.
    pub pool: &'a BufferPool,
}

impl<T: Serialize + ?Sized> Engine<T> for Html<'_> {
    fn render(&self, sink: &mut dyn ResponseSink, binding: &T) -> Result<(), RenderError> {
        let value = Value::from_serialize(binding);
        let mut buf = self.pool.get();

        match &self.layout {
            Some(layout) => {
                let env = self.templates.layout_env(&self.name, value.clone());
                let tmpl = env.get_template(layout)?;
                tmpl.render_captured_to(value, &mut *buf)?;
            }
            None => {
                let tmpl = self.templates.env().get_template(&self.name)?;
                tmpl.render_captured_to(value, &mut *buf)?;
            }
        }

        self.head.write(sink);
        sink.write_body(&buf).map_err(RenderError::partial)?;
        Ok(())
    }
}
