//! Template compilation and layout composition.
//!
//! [`TemplateSet`] compiles every template source found under the configured
//! namespace into one named, immutable set. Layouts embed a content
//! template's output through the `yield()` / `current()` extension points,
//! bound per render call on a derived environment so concurrent requests
//! never observe each other's bindings.

mod source;
mod store;

pub use source::AssetSource;
pub use store::TemplateSet;
