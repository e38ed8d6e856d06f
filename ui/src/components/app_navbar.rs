use crate::i18n::{self};
use crate::t;
use dioxus::prelude::*;

// Navbar stylesheet, inlined so the desktop bundle needs no asset directory.
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Application header: brand, tagline and the locale switcher.
///
/// The selector switches the global Fluent loader and, when the platform
/// provided one, updates the context `Signal<String>` language code so every
/// component reading that marker re-renders with fresh strings.
#[component]
pub fn AppNavbar() -> Element {
    i18n::init();

    let mut current_lang = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                tracing::debug!(lang = %val, "language switched");
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!("[i18n] failed switching to {val} ({err})"),
        }
    };

    let title = t!("app-title");
    let tagline = t!("tagline");

    rsx! {
        document::Title { "{title}" }
        document::Style { "{NAVBAR_CSS_INLINE}" }

        header {
            id: "navbar",
            class: "navbar",
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "{title}" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                rsx!{
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}
