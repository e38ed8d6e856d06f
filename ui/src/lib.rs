//! Shared UI crate for Bookstats: the upload → analyze → render controller,
//! its HTTP backend, results rendering and export, plus the views both
//! launchers mount.

pub mod core;
pub mod i18n;
pub mod results;
pub mod views;

pub mod components {
    // Localized application header (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;

    // Blocking notifications (components/notice.rs)
    pub mod notice;
    pub use notice::{NoticeDialog, PageNotifier};
}
