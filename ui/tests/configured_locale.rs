//! Startup language selection from the configured `locale`. Lives in its own
//! test binary because it switches the process-wide loader.

use i18n_embed::LanguageLoader;
use ui::core::AppConfig;

#[test]
fn configured_locale_is_applied_at_startup() {
    let config = AppConfig::from_toml_str("locale = \"en-US\"\n").expect("valid config");

    let active = ui::i18n::init_with(&config.locale);

    assert_eq!(active, "en-US");
    assert_eq!(ui::i18n::current_language(), "en-US");
    assert_eq!(ui::i18n::LOADER.get("analyze-button"), "Analyze");

    // An unknown locale leaves whatever is active untouched.
    assert_eq!(ui::i18n::init_with("xx-XX"), "en-US");
    assert_eq!(ui::i18n::LOADER.get("analyze-button"), "Analyze");

    assert_eq!(
        ui::i18n::init_with(ui::i18n::DEFAULT_LANGUAGE),
        ui::i18n::DEFAULT_LANGUAGE
    );
    assert_eq!(ui::i18n::LOADER.get("analyze-button"), "Аналізувати");
}
