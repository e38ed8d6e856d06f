pub mod backend;
pub mod chart;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod platform;
pub mod protocol;
pub mod session;

pub use config::AppConfig;
pub use controller::Controller;
pub use error::{AnalyzerError, Result};
