//! Client configuration: where the backend lives, which analysis fields to
//! render and where, and how the results snapshot is saved.
//!
//! The defaults live in `assets/analyzer.toml`, embedded at compile time.

use std::collections::HashSet;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::error::{AnalyzerError, Result};
use super::platform;

const EMBEDDED_CONFIG: &str = include_str!("../../assets/analyzer.toml");

/// Environment variable overriding `api.base_url` on native builds.
pub const API_URL_ENV: &str = "BOOKSTATS_API_URL";

/// Analysis key holding the year → read-count mapping.
pub const YEAR_COUNTS_KEY: &str = "Книг прочитано за роками";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locale: String,
    pub api: ApiConfig,
    pub results: ResultsConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub upload_path: String,
    pub analyze_path: String,
    /// Request timeout; only honoured by the native HTTP client.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsConfig {
    /// `None` disables the year list entirely.
    pub year_counts_key: Option<String>,
    pub charts: Vec<ChartSlot>,
}

/// One chart-bearing analysis field and the element it is drawn into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlot {
    pub field: String,
    pub mount_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled: bool,
    pub filename: String,
}

impl AppConfig {
    /// Embedded configuration plus environment overrides. Never fails: a
    /// broken embedded file degrades to [`AppConfig::default`].
    pub fn load() -> Self {
        let mut config = match Self::embedded() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("embedded configuration rejected ({err}); using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CONFIG)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut mounts = HashSet::new();
        for slot in &self.results.charts {
            if slot.field.trim().is_empty() {
                return Err(AnalyzerError::Config("chart slot with empty field name".into()));
            }
            if slot.mount_id.trim().is_empty() {
                return Err(AnalyzerError::Config(format!(
                    "chart field `{}` has no mount id",
                    slot.field
                )));
            }
            if !mounts.insert(slot.mount_id.as_str()) {
                return Err(AnalyzerError::Config(format!(
                    "mount id `{}` used by more than one chart",
                    slot.mount_id
                )));
            }
        }
        if self.export.enabled && self.export.filename.trim().is_empty() {
            return Err(AnalyzerError::Config("export filename is empty".into()));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::info!("backend url overridden by {API_URL_ENV}: {url}");
                self.api.base_url = Some(url);
            }
        }
    }
}

impl ApiConfig {
    pub fn upload_url(&self) -> Result<Url> {
        self.endpoint(&self.upload_path)
    }

    pub fn analyze_url(&self) -> Result<Url> {
        self.endpoint(&self.analyze_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = match &self.base_url {
            Some(url) => url.clone(),
            None => platform::default_base_url()?,
        };
        let base = Url::parse(&base)
            .map_err(|err| AnalyzerError::Config(format!("invalid base url `{base}`: {err}")))?;
        base.join(path)
            .map_err(|err| AnalyzerError::Config(format!("invalid endpoint path `{path}`: {err}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: crate::i18n::DEFAULT_LANGUAGE.to_string(),
            api: ApiConfig::default(),
            results: ResultsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            upload_path: "/upload".into(),
            analyze_path: "/analyze".into(),
            timeout_secs: 60,
        }
    }
}

impl Default for ResultsConfig {
    fn default() -> Self {
        let charts = [
            ("graph", "graph"),
            ("year_graph", "yearGraph"),
            ("month_graph", "monthGraph"),
            ("weekday_graph", "weekdayGraph"),
            ("ratings_pages_graph", "ratingsPagesGraph"),
            ("min_max_pages_graph", "minMaxPagesGraph"),
        ]
        .into_iter()
        .map(|(field, mount_id)| ChartSlot {
            field: field.into(),
            mount_id: mount_id.into(),
        })
        .collect();

        Self {
            year_counts_key: Some(YEAR_COUNTS_KEY.to_string()),
            charts,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: "analysis_results.png".into(),
        }
    }
}
