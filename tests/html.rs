//! Behavior tests for HTML rendering and layout composition.

mod common;

use std::sync::Arc;

use common::TestSink;
use respond::{Delims, HelperBundle, HtmlOptions, Options, Render, CONTENT_XHTML};
use serde::Serialize;
use serde_json::json;
use tempfile::TempDir;

/// Writes template fixtures into a fresh temp directory.
fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    dir
}

fn render_for(dir: &TempDir, opt: Options) -> Render {
    Render::new(Options {
        directory: dir.path().to_path_buf(),
        ..opt
    })
    .unwrap()
}

#[test]
fn test_renders_template_without_layout() {
    let dir = fixture(&[("hello.tmpl", "<h1>Hello {{ name }}</h1>")]);
    let r = render_for(&dir, Options::default());
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "hello", &json!({ "name": "world" }), None);

    assert_eq!(sink.status, Some(200));
    assert_eq!(sink.content_type(), Some("text/html; charset=UTF-8"));
    assert_eq!(sink.body_str(), "<h1>Hello world</h1>");
}

#[test]
fn test_bindings_are_html_escaped() {
    let dir = fixture(&[("hello.tmpl", "{{ name }}")]);
    let r = render_for(&dir, Options::default());
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "hello", &json!({ "name": "<i>" }), None);

    assert_eq!(sink.body_str(), "&lt;i&gt;");
}

#[test]
fn test_struct_bindings() {
    #[derive(Serialize)]
    struct Page {
        title: String,
        count: usize,
    }

    let dir = fixture(&[("page.tmpl", "{{ title }}: {{ count }}")]);
    let r = render_for(&dir, Options::default());
    let mut sink = TestSink::new();
    let binding = Page {
        title: "Report".into(),
        count: 3,
    };
    r.html(&mut sink, 200, "page", &binding, None);

    assert_eq!(sink.body_str(), "Report: 3");
}

#[test]
fn test_layout_wraps_content_at_yield() {
    let dir = fixture(&[
        ("layout.tmpl", "<html>{{ yield() }}</html>"),
        ("page.tmpl", "hello"),
    ]);
    let r = render_for(
        &dir,
        Options {
            layout: Some("layout".to_string()),
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({}), None);

    assert_eq!(sink.body_str(), "<html>hello</html>");
}

#[test]
fn test_yield_output_is_not_re_escaped() {
    let dir = fixture(&[
        ("layout.tmpl", "{{ yield() }}"),
        ("page.tmpl", "<p>{{ name }}</p>"),
    ]);
    let r = render_for(
        &dir,
        Options {
            layout: Some("layout".to_string()),
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({ "name": "x" }), None);

    // Markup from the content template passes through; only the binding was
    // escaped, once.
    assert_eq!(sink.body_str(), "<p>x</p>");
}

#[test]
fn test_current_returns_content_name() {
    let dir = fixture(&[
        ("layout.tmpl", "{{ current() }}:{{ yield() }}"),
        ("pages/home.tmpl", "hi"),
    ]);
    let r = render_for(
        &dir,
        Options {
            layout: Some("layout".to_string()),
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "pages/home", &json!({}), None);

    assert_eq!(sink.body_str(), "pages/home:hi");
}

#[test]
fn test_per_call_layout_override() {
    let dir = fixture(&[
        ("layout.tmpl", "default[{{ yield() }}]"),
        ("bare.tmpl", "bare[{{ yield() }}]"),
        ("page.tmpl", "x"),
    ]);
    let r = render_for(
        &dir,
        Options {
            layout: Some("layout".to_string()),
            ..Default::default()
        },
    );

    let mut sink = TestSink::new();
    r.html(
        &mut sink,
        200,
        "page",
        &json!({}),
        Some(HtmlOptions {
            layout: Some("bare".to_string()),
        }),
    );
    assert_eq!(sink.body_str(), "bare[x]");
}

#[test]
fn test_per_call_override_can_disable_layout() {
    let dir = fixture(&[
        ("layout.tmpl", "wrapped[{{ yield() }}]"),
        ("page.tmpl", "x"),
    ]);
    let r = render_for(
        &dir,
        Options {
            layout: Some("layout".to_string()),
            ..Default::default()
        },
    );

    let mut sink = TestSink::new();
    r.html(
        &mut sink,
        200,
        "page",
        &json!({}),
        Some(HtmlOptions::default()),
    );
    assert_eq!(sink.body_str(), "x");
}

#[test]
fn test_yield_without_layout_is_an_error() {
    let dir = fixture(&[("page.tmpl", "{{ yield() }}")]);
    let r = render_for(&dir, Options::default());
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({}), None);

    assert_eq!(sink.status, Some(500));
    assert_eq!(sink.content_type(), Some("text/plain; charset=UTF-8"));
    assert!(sink.body_str().contains("no layout defined"));
}

#[test]
fn test_unknown_template_produces_no_partial_body() {
    let dir = fixture(&[("page.tmpl", "x")]);
    let r = render_for(&dir, Options::default());
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "missing", &json!({}), None);

    assert_eq!(sink.status, Some(500));
    // Only the error response was written: one header, no HTML bytes.
    assert_eq!(sink.headers.len(), 1);
    assert_eq!(sink.content_type(), Some("text/plain; charset=UTF-8"));
    assert!(sink.body_str().contains("not found"));
}

#[test]
fn test_helper_bundles_are_available() {
    let shout: HelperBundle = Arc::new(|env: &mut minijinja::Environment<'static>| {
        env.add_function("shout", |v: String| v.to_uppercase());
    });

    let dir = fixture(&[("page.tmpl", "{{ shout(name) }}")]);
    let r = render_for(
        &dir,
        Options {
            helpers: vec![shout],
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({ "name": "quiet" }), None);

    assert_eq!(sink.body_str(), "QUIET");
}

#[test]
fn test_bundles_cannot_replace_yield_placeholder() {
    let hijack: HelperBundle = Arc::new(|env: &mut minijinja::Environment<'static>| {
        env.add_function("yield", || "hijacked".to_string());
    });

    let dir = fixture(&[("page.tmpl", "{{ yield() }}")]);
    let r = render_for(
        &dir,
        Options {
            helpers: vec![hijack],
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({}), None);

    assert_eq!(sink.status, Some(500));
    assert!(sink.body_str().contains("no layout defined"));
}

#[test]
fn test_custom_delimiters() {
    let dir = fixture(&[("page.tmpl", "Hello <% name %>")]);
    let r = render_for(
        &dir,
        Options {
            delims: Some(Delims {
                left: "<%".to_string(),
                right: "%>".to_string(),
            }),
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({ "name": "world" }), None);

    assert_eq!(sink.body_str(), "Hello world");
}

#[test]
fn test_html_content_type_override() {
    let dir = fixture(&[("page.tmpl", "x")]);
    let r = render_for(
        &dir,
        Options {
            html_content_type: Some(CONTENT_XHTML.to_string()),
            ..Default::default()
        },
    );
    let mut sink = TestSink::new();
    r.html(&mut sink, 200, "page", &json!({}), None);

    assert_eq!(
        sink.content_type(),
        Some("application/xhtml+xml; charset=UTF-8")
    );
}
