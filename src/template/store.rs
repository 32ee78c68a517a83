//! Compiled template set.

use std::path::Path;
use std::sync::Arc;

use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, ErrorKind, Value};
use walkdir::WalkDir;

use crate::error::RenderError;
use crate::options::Options;
use crate::template::AssetSource;

/// One addressable set of compiled templates.
///
/// Templates are keyed by their slash-normalized relative path with the
/// matched extension stripped: `templates/admin/users.tmpl` compiles under
/// the name `admin/users`. Every entry parsed successfully; a parse failure
/// aborts [`compile`](Self::compile) rather than admitting a partial set.
///
/// The set is immutable after compilation and safe to execute against from
/// many threads. Recompilation builds a new set off to the side; the caller
/// swaps the shared reference atomically.
pub struct TemplateSet {
    env: Environment<'static>,
}

impl TemplateSet {
    /// Compiles all template source under the configured namespace.
    ///
    /// Enumerates the directory tree recursively (or filters the asset name
    /// list by the namespace prefix), and parses every entry whose extension
    /// matches one of the configured extensions. Helper bundles are applied
    /// first, then the built-in `yield()` / `current()` placeholders, so
    /// bundles can never shadow the placeholders.
    ///
    /// # Errors
    ///
    /// Any read or parse failure is fatal: a partially-working template set
    /// must never be served.
    pub fn compile(opt: &Options) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        if let Some(delims) = &opt.delims {
            let syntax = SyntaxConfig::builder()
                .variable_delimiters(delims.left.clone(), delims.right.clone())
                .build()
                .map_err(|e| RenderError::Template(e.to_string()))?;
            env.set_syntax(syntax);
        }

        for bundle in &opt.helpers {
            bundle(&mut env);
        }
        register_placeholders(&mut env);

        let count = match &opt.asset_source {
            Some(source) => add_from_assets(&mut env, opt, source.as_ref())?,
            None => add_from_dir(&mut env, opt)?,
        };
        tracing::debug!(templates = count, "compiled template set");

        Ok(Self { env })
    }

    /// The compiled environment, for direct template lookup and execution.
    pub fn env(&self) -> &Environment<'static> {
        &self.env
    }

    /// Derives an environment with `yield()` and `current()` bound for one
    /// render call.
    ///
    /// `yield()` renders `content` with `binding` against this set and
    /// returns the markup flagged as pre-sanitized, so the layout does not
    /// re-escape it. `current()` returns `content` unchanged. The shared set
    /// is never mutated; each call gets its own derived environment.
    pub fn layout_env(self: &Arc<Self>, content: &str, binding: Value) -> Environment<'static> {
        let mut env = self.env.clone();

        let set = Arc::clone(self);
        let name = content.to_string();
        env.add_function(
            "yield",
            move || -> Result<Value, minijinja::Error> {
                let tmpl = set.env.get_template(&name)?;
                let markup = tmpl.render(binding.clone())?;
                Ok(Value::from_safe_string(markup))
            },
        );

        let name = content.to_string();
        // The name is emitted verbatim; auto-escape would mangle the slashes
        // in nested names.
        env.add_function("current", move || Value::from_safe_string(name.clone()));

        env
    }
}

/// Installs the default `yield()` / `current()` placeholders.
///
/// `yield()` fails with an explicit condition when a template calls it with
/// no layout selected; `current()` returns an empty identifier.
fn register_placeholders(env: &mut Environment<'static>) {
    env.add_function("yield", || -> Result<Value, minijinja::Error> {
        Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            "yield called with no layout defined",
        ))
    });
    env.add_function("current", || Value::from(""));
}

fn add_from_dir(env: &mut Environment<'static>, opt: &Options) -> Result<usize, RenderError> {
    let mut count = 0;
    // A missing or unreadable directory compiles an empty set; only entries
    // that exist and fail to read or parse are fatal.
    for entry in WalkDir::new(&opt.directory).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(&opt.directory)
            .unwrap_or_else(|_| entry.path());
        let rel = slash_name(rel);

        let Some(ext) = last_dot_extension(&rel) else {
            continue;
        };
        if !opt.extensions.iter().any(|e| e == ext) {
            continue;
        }

        let bytes = std::fs::read(entry.path()).map_err(|e| RenderError::Read {
            path: entry.path().to_path_buf(),
            message: e.to_string(),
        })?;
        let source = String::from_utf8(bytes).map_err(|e| RenderError::Read {
            path: entry.path().to_path_buf(),
            message: e.to_string(),
        })?;

        let name = rel[..rel.len() - ext.len()].to_string();
        env.add_template_owned(name, source)?;
        count += 1;
    }
    Ok(count)
}

fn add_from_assets(
    env: &mut Environment<'static>,
    opt: &Options,
    source: &dyn AssetSource,
) -> Result<usize, RenderError> {
    let prefix = opt.directory.to_string_lossy().replace('\\', "/");
    let mut count = 0;
    for asset in source.names() {
        let Some(rest) = asset.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let rel = rest.trim_start_matches('/');

        // Asset names may carry compound extensions like `.html.tmpl`, so
        // match everything from the first dot.
        let Some(ext) = first_dot_extension(rel) else {
            continue;
        };
        if !opt.extensions.iter().any(|e| e == ext) {
            continue;
        }

        let bytes = source.bytes(&asset).map_err(|e| RenderError::Read {
            path: asset.clone().into(),
            message: e.to_string(),
        })?;
        let content = String::from_utf8(bytes).map_err(|e| RenderError::Read {
            path: asset.clone().into(),
            message: e.to_string(),
        })?;

        let name = rel[..rel.len() - ext.len()].to_string();
        env.add_template_owned(name, content)?;
        count += 1;
    }
    Ok(count)
}

/// Joins path components with forward slashes regardless of platform.
fn slash_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extension of the final path segment, dot included.
fn last_dot_extension(rel: &str) -> Option<&str> {
    let file = rel.rsplit('/').next().unwrap_or(rel);
    file.rfind('.').map(|i| &file[i..])
}

/// Everything from the first dot of the relative name, dot included.
fn first_dot_extension(rel: &str) -> Option<&str> {
    rel.find('.').map(|i| &rel[i..])
}
