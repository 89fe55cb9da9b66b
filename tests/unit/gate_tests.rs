// Minification gate unit tests: rule precedence and defaults

use htmlmin::config::MinifyConfig;
use htmlmin::gate::{DecisionReason, MinificationGate, ResponseMetadata};
use rstest::rstest;

fn gate(enabled: Option<bool>, debug: bool, excluded: &[&str]) -> MinificationGate {
    MinificationGate::new(MinifyConfig {
        enabled,
        keep_comments: None,
        exclude_patterns: excluded.iter().map(|p| p.to_string()).collect(),
        debug,
    })
    .expect("valid configuration")
}

#[rstest]
#[case(301)]
#[case(404)]
#[case(500)]
#[case(204)]
fn test_non_200_always_skips_even_when_forced(#[case] status: u16) {
    let gate = gate(Some(true), false, &[]);
    let meta = ResponseMetadata::new(status, "text/html").with_override(true);
    assert_eq!(gate.decide(&meta, "/"), DecisionReason::NonOkStatus);
    assert!(!gate.should_minify(&meta, "/"));
}

#[rstest]
#[case("application/json")]
#[case("text/plain")]
#[case("application/xhtml+xml")]
#[case("")]
fn test_non_html_skips(#[case] content_type: &str) {
    let gate = gate(Some(true), false, &[]);
    let meta = ResponseMetadata::new(200, content_type);
    assert_eq!(gate.decide(&meta, "/"), DecisionReason::NonHtmlContentType);
}

#[rstest]
#[case("text/html")]
#[case("text/html; charset=utf-8")]
#[case("TEXT/HTML; Charset=UTF-8")]
#[case("text/html;charset=iso-8859-1")]
fn test_html_with_any_charset_minifies(#[case] content_type: &str) {
    let gate = gate(None, false, &[]);
    assert!(gate.should_minify(&ResponseMetadata::new(200, content_type), "/"));
}

#[test]
fn test_override_true_beats_exclusion_list() {
    let gate = gate(None, false, &["/raw/"]);
    let meta = ResponseMetadata::new(200, "text/html").with_override(true);
    assert!(gate.should_minify(&meta, "/raw/"));
}

#[test]
fn test_override_false_beats_enabled_switch() {
    let gate = gate(Some(true), false, &[]);
    let meta = ResponseMetadata::new(200, "text/html").with_override(false);
    assert!(!gate.should_minify(&meta, "/"));
}

#[test]
fn test_override_true_beats_disabled_switch_and_debug() {
    let gate = gate(Some(false), true, &[]);
    let meta = ResponseMetadata::new(200, "text/html").with_override(true);
    assert!(gate.should_minify(&meta, "/"));
}

#[rstest]
// enabled, debug, expected
#[case(None, false, DecisionReason::ReleaseDefault)]
#[case(None, true, DecisionReason::DebugDefault)]
#[case(Some(true), true, DecisionReason::EnabledGlobally)]
#[case(Some(false), false, DecisionReason::DisabledGlobally)]
fn test_global_switch_resolution(
    #[case] enabled: Option<bool>,
    #[case] debug: bool,
    #[case] expected: DecisionReason,
) {
    let gate = gate(enabled, debug, &[]);
    assert_eq!(
        gate.decide(&ResponseMetadata::new(200, "text/html"), "/"),
        expected
    );
}

#[test]
fn test_exclusion_short_circuits_on_first_match() {
    let gate = gate(Some(true), false, &["^/admin", "/raw/", "\\.txt$"]);
    let meta = ResponseMetadata::new(200, "text/html");
    assert_eq!(gate.decide(&meta, "/admin/x"), DecisionReason::ExcludedPath);
    assert_eq!(gate.decide(&meta, "/a/raw/b"), DecisionReason::ExcludedPath);
    assert_eq!(gate.decide(&meta, "/notes.txt"), DecisionReason::ExcludedPath);
    assert_eq!(gate.decide(&meta, "/home"), DecisionReason::EnabledGlobally);
}

#[test]
fn test_skip_returns_body_unchanged() {
    let html = "<html>   <body>some text here</body>    </html>";
    let gate = gate(Some(false), false, &[]);
    let out = gate.process(&ResponseMetadata::new(200, "text/html"), "/", html);
    assert_eq!(out, html);
}

#[test]
fn test_already_minified_input_is_unchanged() {
    let html = "<html> <body>some text here</body> </html>";
    let gate = gate(None, false, &[]);
    let out = gate.process(&ResponseMetadata::new(200, "text/html"), "/", html);
    assert_eq!(out, html);
}

#[test]
fn test_gate_shared_across_threads() {
    let gate = std::sync::Arc::new(gate(None, false, &["/raw/"]));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let gate = gate.clone();
            std::thread::spawn(move || {
                let path = if i % 2 == 0 { "/raw/" } else { "/page" };
                let meta = ResponseMetadata::new(200, "text/html");
                gate.process(&meta, path, "<p>  x  </p>").into_owned()
            })
        })
        .collect();

    let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs[0], "<p>  x  </p>");
    assert_eq!(outputs[1], "<p> x </p>");
    assert_eq!(outputs[2], "<p>  x  </p>");
    assert_eq!(outputs[3], "<p> x </p>");
}
