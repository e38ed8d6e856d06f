#![cfg(test)]
//! The desktop build inlines the shared theme (`ui/assets/theme/main.css`) and
//! the navbar sheet; a broken path or truncated file only shows at runtime, so
//! check both here.
//!
//! If you rename or relocate either file, update this test and the
//! `include_str!` constants in `desktop/src/main.rs` and
//! `ui/src/components/app_navbar.rs`.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

#[test]
fn embedded_css_files_are_not_empty() {
    assert!(!EMBEDDED_CSS.trim().is_empty(), "Embedded theme is empty.");
    assert!(!NAVBAR_CSS.trim().is_empty(), "Embedded navbar sheet is empty.");
}

#[test]
fn embedded_css_contains_expected_tokens() {
    let required = ["--color-bg", "body {", ".button--primary", ".visually-hidden"];
    for token in required {
        assert!(
            EMBEDDED_CSS.contains(token),
            "Expected token `{token}` missing from embedded CSS"
        );
    }
}

#[test]
fn braces_are_balanced() {
    for (name, css) in [("main.css", EMBEDDED_CSS), ("navbar.css", NAVBAR_CSS)] {
        let open = css.matches('{').count();
        let close = css.matches('}').count();
        assert_eq!(open, close, "{name}: {open} opening vs {close} closing braces");
    }
}
