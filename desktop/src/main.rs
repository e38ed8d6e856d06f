#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(not(feature = "desktop"))]
compile_error!("bookstats-desktop is built with its `desktop` feature");

use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::prelude::*;

use ui::components::AppNavbar;
use ui::core::AppConfig;
use ui::views::Analyzer;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/")]
    Analyzer {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

fn main() {
    dioxus::logger::initialize_default();

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Bookstats – v{}", env!("CARGO_PKG_VERSION")))
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 860.0)),
            ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    // Global language code, seeded from the configured locale; AppNavbar
    // updates it on selection.
    let lang_code = use_signal(|| ui::i18n::init_with(&AppConfig::load().locale));
    use_context_provider(|| lang_code);

    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        Router::<Route> { }
    }
}

/// A desktop-specific Router around the shared `AppNavbar` component
/// which allows us to use the desktop-specific `Route` enum.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }

        Outlet::<Route> {}
    }
}
