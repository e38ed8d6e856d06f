#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The analyzer page renders fixed element ids and classes (upload container,
status line, analyze button, results region, chart mounts, notice dialog).
If a refactor drops one of their rules from the shared theme, the packaged
desktop build silently loses styling; this test fails early instead.

When renaming a selector, update the component markup in `ui/src` and
REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const NAVBAR_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/navbar.css"
));

/// Selectors / tokens the analyzer page relies on.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    ".button:disabled",
    // Upload → analyze flow
    ".analysis__upload",
    ".analysis__upload.is-hidden",
    ".analysis__status",
    "#analyzeButton",
    // Results region
    ".analysis__results",
    ".analysis__results.is-collapsed",
    ".analysis__years",
    ".analysis__year",
    ".analysis__charts",
    ".analysis__chart",
    // Export
    ".analysis__export",
    ".analysis__feedback",
    // Notice dialog
    ".notice-backdrop",
    ".notice__message",
    // Responsive block
    "@media (max-width: 720px)",
];

const NAVBAR_SELECTORS: &[&str] = &[
    ".navbar {",
    ".navbar__inner",
    ".navbar__brand-mark",
    ".navbar__brand-subtitle",
    ".navbar__locale",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors/tokens in unified theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn navbar_sheet_contains_required_selectors() {
    let missing: Vec<&str> = NAVBAR_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !NAVBAR_CSS.contains(sel))
        .collect();

    assert!(missing.is_empty(), "Missing navbar selectors:\n{}", missing.join("\n"));
}

#[test]
fn collapsed_results_stay_measurable() {
    // Charts are drawn into the collapsed region before it is revealed.
    let block = THEME_CSS
        .split(".analysis__results.is-collapsed")
        .nth(1)
        .and_then(|rest| rest.split('}').next())
        .expect("collapsed results rule");
    assert!(block.contains("visibility: hidden"));
    assert!(!block.contains("display: none"));
}
