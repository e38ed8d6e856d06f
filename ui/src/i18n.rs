//! Internationalization (i18n) support for `bookstats-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - Fluent message formatting (through `i18n_embed::fluent`)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   uk-UA/bookstats-ui.ftl   (fallback/reference)
//!   en-US/bookstats-ui.ftl   (additional locale)
//! ```
//!
//! Usage in a component:
//! ```ignore
//! use crate::t;
//! let label = t!("analyze-button");
//! ```
//!
//! The application is Ukrainian first: `init()` selects the fallback locale,
//! `init_with()` then applies the configured one, and the navbar switches at
//! runtime through `set_language`.
//!
//! Public API surface:
//! - `init()` – load the fallback bundle (safe to call multiple times).
//! - `init_with()` / `current_language()` – startup locale and the active one.
//! - `set_language(tag: &str)` – switch language at runtime.
//! - `available_languages()` – discover embedded language tags (for a picker).
//! - `fl` macro re-export (for direct keyed access when needed).
//! - `LOADER` – global `FluentLanguageLoader` consumed by `t!` & `fl!`.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro.
///
/// Expands to `fl!(&*LOADER, ...)` and strips the Unicode isolation marks
/// Fluent puts around placeables, so the result can be compared and rendered
/// as plain text.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::plain($crate::i18n::fl!(&*$crate::i18n::LOADER, $key))
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::plain($crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ ))
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "bookstats-ui";

/// Locale every session starts in.
pub const DEFAULT_LANGUAGE: &str = "uk-UA";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = DEFAULT_LANGUAGE
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let fallback = LOADER.fallback_language().clone();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &[fallback]) {
            tracing::warn!("[i18n] failed selecting fallback language ({err})");
        }
    });
}

/// Initialize, then switch to `tag` when it names an embedded locale.
/// Returns the language lookups resolve in afterwards.
pub fn init_with(tag: &str) -> String {
    init();
    if tag != current_language() {
        if !available_languages().iter().any(|code| code == tag) {
            tracing::warn!("[i18n] configured locale {tag} is not embedded; keeping {DEFAULT_LANGUAGE}");
        } else if let Err(err) = set_language(tag) {
            tracing::warn!("[i18n] failed switching to configured locale {tag} ({err})");
        }
    }
    current_language()
}

/// Code of the language lookups currently resolve in.
pub fn current_language() -> String {
    LOADER
        .current_languages()
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[doc(hidden)]
pub fn plain(message: String) -> String {
    if message.contains(['\u{2068}', '\u{2069}']) {
        message.replace(['\u{2068}', '\u{2069}'], "")
    } else {
        message
    }
}
