//! Configuration options for the [`Render`](crate::Render) façade.

use std::path::PathBuf;
use std::sync::Arc;

use minijinja::Environment;

use crate::engine::CONTENT_HTML;
use crate::template::AssetSource;

/// A bundle of helper functions applied to the template environment at
/// compilation time.
///
/// Bundles run in registration order before the built-in `yield()` /
/// `current()` placeholders, so a bundle may shadow another bundle's
/// functions but can never replace the placeholders.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use respond::HelperBundle;
///
/// let shouting: HelperBundle = Arc::new(|env: &mut minijinja::Environment<'static>| {
///     env.add_function("shout", |v: String| v.to_uppercase());
/// });
/// ```
pub type HelperBundle = Arc<dyn Fn(&mut Environment<'static>) + Send + Sync>;

/// A pair of left and right delimiters for template expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delims {
    /// Left delimiter, e.g. `{{`.
    pub left: String,
    /// Right delimiter, e.g. `}}`.
    pub right: String,
}

/// Per-call overrides for [`Render::html`](crate::Render::html).
///
/// Passing `Some(HtmlOptions { layout: None })` disables the globally
/// configured layout for that one call.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Layout template name, overriding [`Options::layout`].
    pub layout: Option<String>,
}

/// Configuration for constructing a [`Render`](crate::Render) instance.
///
/// Every field is optional; zero values are filled with defaults at
/// construction time (see the field docs). The options are fixed once the
/// instance is built, except that development mode recompiles the template
/// set from them on every HTML render.
#[derive(Clone, Default)]
pub struct Options {
    /// Directory to load templates from. Defaults to `templates`.
    pub directory: PathBuf,
    /// Asset provider to use in place of the directory walk.
    pub asset_source: Option<Arc<dyn AssetSource>>,
    /// Layout template name. No layout is rendered when `None`.
    pub layout: Option<String>,
    /// File extensions to compile templates from. Defaults to `[".tmpl"]`.
    pub extensions: Vec<String>,
    /// Helper function bundles applied to the template environment.
    pub helpers: Vec<HelperBundle>,
    /// Custom expression delimiters. Defaults to `{{` / `}}`.
    pub delims: Option<Delims>,
    /// Character set appended to Content-Type headers. Defaults to `UTF-8`.
    pub charset: String,
    /// Output human readable JSON.
    pub indent_json: bool,
    /// Output human readable XML.
    pub indent_xml: bool,
    /// Bytes written before the JSON body, e.g. `)]}',\n` to defeat JSON
    /// hijacking.
    pub prefix_json: Option<Vec<u8>>,
    /// Bytes written before the XML body.
    pub prefix_xml: Option<Vec<u8>>,
    /// Content-Type for HTML responses. Defaults to `text/html`; set to
    /// [`CONTENT_XHTML`](crate::CONTENT_XHTML) for XHTML output.
    pub html_content_type: Option<String>,
    /// Recompile the template set on every HTML render.
    pub development: bool,
    /// Leave `<`, `>` and `&` literal in JSON output instead of escaping
    /// them for inline-script safety.
    pub unescape_html: bool,
    /// Stream JSON to the sink instead of buffering the whole payload.
    /// Trades the no-partial-body guarantee for lower peak memory.
    pub streaming_json: bool,
}

impl Options {
    /// Fills zero-valued fields with their defaults.
    pub(crate) fn prepare(&mut self) {
        if self.directory.as_os_str().is_empty() {
            self.directory = PathBuf::from("templates");
        }
        if self.extensions.is_empty() {
            self.extensions = vec![".tmpl".to_string()];
        }
        if self.charset.is_empty() {
            self.charset = "UTF-8".to_string();
        }
        if self.html_content_type.is_none() {
            self.html_content_type = Some(CONTENT_HTML.to_string());
        }
    }
}
