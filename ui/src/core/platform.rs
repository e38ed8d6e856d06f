//! Platform glue: backend origin and blocking notifications.

use super::error::Result;

/// Local Flask development server used when the desktop build has no base url.
#[cfg(not(target_arch = "wasm32"))]
pub const DESKTOP_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    /// Whether blocking notifications come from the host (`window.alert`)
    /// rather than the in-page dialog.
    pub fn has_native_alert(self) -> bool {
        matches!(self, Self::Web)
    }
}

/// Base url requests are resolved against when none is configured.
#[cfg(target_arch = "wasm32")]
pub fn default_base_url() -> Result<String> {
    use super::error::AnalyzerError;

    web_sys::window()
        .ok_or_else(|| AnalyzerError::Config("window unavailable".into()))?
        .location()
        .origin()
        .map_err(|_| AnalyzerError::Config("page origin unavailable".into()))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn default_base_url() -> Result<String> {
    Ok(DESKTOP_BASE_URL.to_string())
}

/// Blocking host alert. Returns `false` when the host has none.
pub fn alert(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        match web_sys::window() {
            Some(window) => window.alert_with_message(message).is_ok(),
            None => false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        false
    }
}
