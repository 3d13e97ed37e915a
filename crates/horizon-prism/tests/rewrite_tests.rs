//! End-to-end tests for custom function rewriting.

use std::fs;
use std::io;
use std::sync::Arc;

use horizon_prism::prelude::*;
use parking_lot::Mutex;

fn rewriter() -> Rewriter {
    Rewriter::new(Options::default())
}

// In-memory writer for asserting on emitted log lines.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl LogSink {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_plain_values_unchanged() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("10px solid red"), "10px solid red");
    assert_eq!(rewriter.rewrite("inherit"), "inherit");
    assert_eq!(rewriter.rewrite(""), "");
}

#[test]
fn test_bare_parentheses_evaluate_as_math() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("margin: (2+3)px auto"), "margin: 5px auto");
    assert_eq!(rewriter.rewrite("width: (10/4)em"), "width: 2.5em");
}

#[test]
fn test_named_math_calls() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("math(2 + 3*4)"), "14");
    assert_eq!(rewriter.rewrite("z-index: math(2 * (3+1))"), "z-index: 8");
    // Pre-spaced parentheses behave the same as tight ones.
    assert_eq!(rewriter.rewrite("math( 1+2)"), "3");
}

#[test]
fn test_minus_prefixed_expressions() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("top: -(4)px"), "top: -4px");
    assert_eq!(rewriter.rewrite("margin: 10px -(2+3)"), "margin: 10px -5");
}

#[test]
fn test_percent_and_alias() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("width: percent(1, 4)"), "width: 25%");
    assert_eq!(rewriter.rewrite("width: pc(1, 4)"), "width: 25%");
    assert_eq!(rewriter.rewrite("width: percent(1, 3)"), "width: 33.3333333%");
}

#[test]
fn test_percent_precision_argument() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("percent(1, 3, 2)"), "33.33%");
    assert_eq!(rewriter.rewrite("percent(2, 3, 4)"), "66.6666%");
}

#[test]
fn test_color_adjust_family() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("color: h-adjust(red, 50%)"), "color: #00ffff");
    assert_eq!(
        rewriter.rewrite("border-color: l-adjust(#ff0000, 10)"),
        "border-color: #ff3333"
    );
    assert_eq!(rewriter.rewrite("s-adjust(#ff0000, -100)"), "#808080");
    assert_eq!(rewriter.rewrite("hsl-adjust(#ff0000, 50, 0, 0)"), "#00ffff");
}

#[test]
fn test_rgba_alpha_is_preserved() {
    let rewriter = rewriter();

    assert_eq!(
        rewriter.rewrite("background: h-adjust(rgba(255, 0, 0, .5), 50%)"),
        "background: rgba(0,255,255,.5)"
    );
}

#[test]
fn test_nested_calls_resolve_innermost_first() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("math(math(1+1)*4)"), "8");
    assert_eq!(rewriter.rewrite("percent(math(1+1), 8)"), "25%");
    assert_eq!(rewriter.rewrite("percent(pc(1, 2), 1)"), "5000%");
}

#[test]
fn test_case_sensitive_names_are_erased() {
    let rewriter = rewriter();

    // The pattern matches case-insensitively but dispatch does not, so an
    // uppercase call resolves to nothing.
    assert_eq!(rewriter.rewrite("PERCENT(1,4)"), "");
    assert_eq!(rewriter.rewrite("MATH(1+1)"), "");
}

#[test]
fn test_unbalanced_call_is_skipped() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("math(1+2"), "math(1+2");
    assert_eq!(rewriter.rewrite("width: percent(1, 4"), "width: percent(1, 4");
}

#[test]
fn test_standard_css_functions_untouched() {
    let rewriter = rewriter();

    assert_eq!(
        rewriter.rewrite("width: calc(100% - 10px)"),
        "width: calc(100% - 10px)"
    );
    assert_eq!(
        rewriter.rewrite("background: url(image.png)"),
        "background: url(image.png)"
    );
    assert_eq!(
        rewriter.rewrite("transform: translate(10px, 20px)"),
        "transform: translate(10px, 20px)"
    );
}

#[test]
fn test_data_uri_inlines_relative_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("dot.gif"), b"GIF89a").unwrap();

    let rewriter = Rewriter::new(Options::new().base_dir(dir.path()));
    assert_eq!(
        rewriter.rewrite("background: data-uri(dot.gif)"),
        "background: url(data:image/gif;base64,R0lGODlh)"
    );
}

#[test]
fn test_data_uri_respects_doc_root() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("fonts")).unwrap();
    fs::write(root.path().join("fonts/body.woff"), b"wOFF").unwrap();

    let rewriter = Rewriter::new(Options::new().doc_root(root.path()));
    let result = rewriter.rewrite("src: data-uri(/fonts/body.woff)");
    assert!(
        result.starts_with("src: url(data:font/woff;charset=utf-8;base64,"),
        "unexpected result: {result}"
    );
}

#[test]
fn test_data_uri_leaves_remote_urls() {
    let rewriter = rewriter();

    assert_eq!(
        rewriter.rewrite("cursor: data-uri(https://cdn.example/c.png)"),
        "cursor: url(https://cdn.example/c.png)"
    );
}

#[test]
fn test_data_uri_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();

    let rewriter = Rewriter::new(Options::new().base_dir(dir.path()));
    assert_eq!(
        rewriter.rewrite("background: data-uri(gone.png)"),
        "background: url(gone.png)"
    );
}

#[test]
fn test_data_uri_resolves_string_tokens() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("badge.svg"),
        b"<svg xmlns='http://www.w3.org/2000/svg'/>",
    )
    .unwrap();

    let rewriter = Rewriter::new(Options::new().base_dir(dir.path()));
    let label = rewriter.tokens().store("'badge.svg'");
    let result = rewriter.rewrite(&format!("background: data-uri({label})"));
    assert!(
        result.starts_with("background: url(data:image/svg+xml;base64,"),
        "unexpected result: {result}"
    );

    // A token naming a missing file still falls back to the resolved path.
    let label = rewriter.tokens().store("\"images/logo.png\"");
    assert_eq!(
        rewriter.rewrite(&format!("background: data-uri({label})")),
        "background: url(images/logo.png)"
    );
}

#[test]
fn test_data_uri_warns_on_oversized_payload() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("big.png"), vec![0u8; 40_000]).unwrap();

    let sink = LogSink::default();
    let writer = sink.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let rewriter = Rewriter::new(Options::new().base_dir(dir.path()));
    let result = tracing::subscriber::with_default(subscriber, || {
        rewriter.rewrite("background: data-uri(big.png)")
    });

    // The ceiling is advisory, so the asset still inlines.
    assert!(
        result.starts_with("background: url(data:image/png;base64,"),
        "unexpected result: {result}"
    );
    let logs = sink.contents();
    assert!(
        logs.contains("legacy browser ceiling"),
        "missing size warning in logs: {logs}"
    );
}

#[test]
fn test_rewrite_is_idempotent() {
    let rewriter = rewriter();

    let inputs = [
        "margin: (2+3)px auto",
        "width: percent(1, 3)",
        "color: h-adjust(#ff0000, 50%)",
        "background: url(logo.png)",
    ];
    for input in inputs {
        let once = rewriter.rewrite(input);
        assert_eq!(rewriter.rewrite(&once), once, "not idempotent for {input}");
    }
}

#[test]
fn test_multibyte_text_around_calls() {
    let rewriter = rewriter();

    assert_eq!(rewriter.rewrite("内容: math(1+1)px"), "内容: 2px");
}

#[test]
fn test_mixed_declaration_value() {
    let rewriter = rewriter();

    assert_eq!(
        rewriter.rewrite("border: math(1+1)px solid h-adjust(red, 50%)"),
        "border: 2px solid #00ffff"
    );
}
