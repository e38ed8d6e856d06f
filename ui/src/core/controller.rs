//! The upload → analyze → render controller.
//!
//! The controller owns no UI. It drives a [`Session`] through its phases and
//! talks to four collaborators, one trait each, so the same code runs in the
//! browser, in the desktop webview and in tests:
//!
//! - [`Backend`]: the two remote calls
//! - [`ChartRenderer`]: draws a chart spec into a mount point
//! - [`Notifier`]: blocking user notification
//! - [`SnapshotExporter`]: rasterizes and saves the results region
//!
//! Every failed call ends in exactly one notification and leaves the session
//! as it was before the call.

use std::cell::RefCell;

use dioxus::prelude::{Signal, Writable};
use tracing::{debug, info, warn};

use super::chart::ChartSpec;
use super::config::AppConfig;
use super::error::{AnalyzerError, Result};
use super::protocol::{AnalyzeReply, AnalyzeRequest, UploadFile, UploadReply};
use super::session::{RenderedResults, Session};
use crate::t;

#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReply>;
    async fn analyze(&self, request: &AnalyzeRequest<'_>) -> Result<AnalyzeReply>;
}

pub trait ChartRenderer {
    fn render(&self, mount_id: &str, spec: &ChartSpec);
    /// Empty a mount left over from an earlier analysis.
    fn clear(&self, mount_id: &str);
}

pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Where an exported snapshot ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Written to a file on disk (desktop).
    Saved(String),
    /// Handed to the browser's download machinery.
    DownloadStarted,
}

#[allow(async_fn_in_trait)]
pub trait SnapshotExporter {
    async fn export(&self, results: &RenderedResults, filename: &str) -> Result<ExportOutcome>;
}

/// Shared home of the [`Session`]. Borrows never span an `.await`.
pub trait SessionStore {
    fn update_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T;
}

impl SessionStore for RefCell<Session> {
    fn update_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.borrow_mut())
    }
}

impl SessionStore for Signal<Session> {
    fn update_session<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut signal = *self;
        signal.with_mut(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Upload,
    Analyze,
}

pub struct Controller<B, R, N, X, S> {
    config: AppConfig,
    backend: B,
    renderer: R,
    notifier: N,
    exporter: X,
    session: S,
}

impl<B, R, N, X, S> Controller<B, R, N, X, S>
where
    B: Backend,
    R: ChartRenderer,
    N: Notifier,
    X: SnapshotExporter,
    S: SessionStore,
{
    pub fn new(
        config: AppConfig,
        backend: B,
        renderer: R,
        notifier: N,
        exporter: X,
        session: S,
    ) -> Self {
        crate::i18n::init();
        Self {
            config,
            backend,
            renderer,
            notifier,
            exporter,
            session,
        }
    }

    /// Upload a freshly chosen file and keep the returned handle.
    pub async fn on_file_selected(&self, file: UploadFile) {
        let Some(ticket) = self.session.update_session(Session::begin_upload) else {
            debug!("file selection ignored: a request is in flight");
            return;
        };

        info!(file = %file.name, bytes = file.bytes.len(), "uploading file");
        let outcome = self
            .backend
            .upload(&file)
            .await
            .and_then(UploadReply::into_handle);

        match outcome {
            Ok(handle) => {
                info!(handle = handle.as_str(), "upload accepted");
                self.session
                    .update_session(|session| session.complete_upload(ticket, handle));
            }
            Err(err) => {
                self.session.update_session(|session| session.abort(ticket));
                self.report(Call::Upload, &err);
            }
        }
    }

    /// The chosen file could not be read locally; treated like a failed upload.
    pub fn on_file_unreadable(&self, name: &str) {
        warn!(file = name, "selected file could not be read");
        self.notifier.notify(&t!("error-upload-generic"));
    }

    /// Analyze the uploaded file and render every configured field present in
    /// the answer. Without an uploaded file this does nothing.
    pub async fn on_analyze_triggered(&self) {
        let Some((ticket, handle)) = self.session.update_session(Session::begin_analyze) else {
            debug!("analyze ignored: no uploaded file or a request is in flight");
            return;
        };

        info!(handle = handle.as_str(), "requesting analysis");
        let outcome = self
            .backend
            .analyze(&AnalyzeRequest::for_handle(&handle))
            .await
            .and_then(AnalyzeReply::into_analysis)
            .and_then(|analysis| RenderedResults::from_analysis(&analysis, &self.config.results));

        match outcome {
            Ok(results) => {
                for chart in &results.charts {
                    debug!(mount = %chart.slot.mount_id, field = %chart.slot.field, "rendering chart");
                    self.renderer.render(&chart.slot.mount_id, &chart.spec);
                }
                for slot in &self.config.results.charts {
                    if !results.charts.iter().any(|chart| chart.slot == *slot) {
                        self.renderer.clear(&slot.mount_id);
                    }
                }
                info!(
                    years = results.years.len(),
                    charts = results.charts.len(),
                    "analysis rendered"
                );
                self.session
                    .update_session(|session| session.complete_analyze(ticket, results));
            }
            Err(err) => {
                self.session.update_session(|session| session.abort(ticket));
                self.report(Call::Analyze, &err);
            }
        }
    }

    /// Rasterize the results region and save it under the configured name.
    pub async fn on_download_triggered(&self) -> Option<ExportOutcome> {
        if !self.config.export.enabled {
            return None;
        }
        let Some((ticket, results)) = self.session.update_session(Session::begin_export) else {
            debug!("download ignored: nothing rendered or a request is in flight");
            return None;
        };

        let filename = self.config.export.filename.as_str();
        match self.exporter.export(&results, filename).await {
            Ok(outcome) => {
                info!(?outcome, "results snapshot exported");
                self.session.update_session(|session| session.complete_export(ticket));
                Some(outcome)
            }
            Err(err) => {
                warn!("snapshot export failed: {err}");
                self.session.update_session(|session| session.abort(ticket));
                self.notifier
                    .notify(&t!("error-export", message = err.to_string()));
                None
            }
        }
    }

    fn report(&self, call: Call, err: &AnalyzerError) {
        match err {
            AnalyzerError::Rejected { .. } => info!(?call, "server rejected request: {err}"),
            _ => warn!(?call, "request failed: {err}"),
        }

        let message = match (call, err.server_message()) {
            (Call::Upload, Some(server)) => t!("error-upload-rejected", message = server),
            (Call::Upload, None) => t!("error-upload-generic"),
            (Call::Analyze, Some(server)) => t!("error-analyze-rejected", message = server),
            (Call::Analyze, None) => t!("error-analyze-generic"),
        };
        self.notifier.notify(&message);
    }
}
