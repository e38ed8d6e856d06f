//! Session state for one page lifetime: the uploaded file handle, the UI
//! phase and what the results region currently shows.
//!
//! Phases only move forward (`Idle` -> `Uploaded` -> `Analyzed`); a new upload
//! lands back in `Uploaded`. Every remote call is bracketed by a `begin_*`
//! that may refuse (nothing to do, or another call in flight) and a
//! `complete_*` / `abort_*` pair. Aborting restores exactly what the user saw
//! before the call.

use super::chart::ChartSpec;
use super::config::{ChartSlot, ResultsConfig};
use super::error::{AnalyzerError, Result};
use super::protocol::{Analysis, FileHandle, YearCount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploaded,
    Analyzed,
}

/// Status line shown under the upload affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    Uploading,
    Uploaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Upload,
    Analyze,
    Export,
}

/// A chart handed to the renderer, remembered for the snapshot export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub slot: ChartSlot,
    pub spec: ChartSpec,
}

/// Content of the results region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedResults {
    pub years: Vec<YearCount>,
    /// The year field was in the answer, even if it listed no year.
    pub years_present: bool,
    pub charts: Vec<RenderedChart>,
}

impl RenderedResults {
    /// Pick the configured fields out of `analysis`. Any present field that
    /// fails to decode fails the whole result; an answer holding none of the
    /// configured fields is malformed.
    pub fn from_analysis(analysis: &Analysis, config: &ResultsConfig) -> Result<Self> {
        let years = match config
            .year_counts_key
            .as_deref()
            .filter(|key| !key.is_empty())
        {
            Some(key) => analysis.year_counts(key)?,
            None => None,
        };
        let years_present = years.is_some();
        let years = years.unwrap_or_default();

        let mut charts = Vec::new();
        for slot in &config.charts {
            if let Some(spec) = analysis.chart(&slot.field)? {
                charts.push(RenderedChart {
                    slot: slot.clone(),
                    spec,
                });
            }
        }

        let rendered = Self {
            years,
            years_present,
            charts,
        };
        if rendered.is_empty() {
            return Err(AnalyzerError::malformed(
                "analysis holds none of the configured fields",
            ));
        }
        Ok(rendered)
    }

    /// Nothing to show: no year field and no chart.
    pub fn is_empty(&self) -> bool {
        !self.years_present && self.charts.is_empty()
    }
}

/// Proof that a call was started, carrying what to restore on abort.
#[derive(Debug)]
#[must_use]
pub struct Ticket {
    request: Request,
    prior_status: Option<StatusLine>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    phase: Phase,
    handle: Option<FileHandle>,
    status: Option<StatusLine>,
    in_flight: Option<Request>,
    results: Option<RenderedResults>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle(&self) -> Option<&FileHandle> {
        self.handle.as_ref()
    }

    pub fn status(&self) -> Option<StatusLine> {
        self.status
    }

    pub fn in_flight(&self) -> Option<Request> {
        self.in_flight
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn results(&self) -> Option<&RenderedResults> {
        self.results.as_ref()
    }

    pub fn upload_visible(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn analyze_visible(&self) -> bool {
        self.phase == Phase::Uploaded
    }

    pub fn status_visible(&self) -> bool {
        self.status.is_some() && self.phase != Phase::Analyzed
    }

    pub fn results_visible(&self) -> bool {
        self.results.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn download_visible(&self, export_enabled: bool) -> bool {
        export_enabled && self.phase == Phase::Analyzed && self.results_visible()
    }

    pub fn begin_upload(&mut self) -> Option<Ticket> {
        if self.is_busy() {
            return None;
        }
        let ticket = self.open(Request::Upload);
        self.status = Some(StatusLine::Uploading);
        Some(ticket)
    }

    pub fn complete_upload(&mut self, ticket: Ticket, handle: FileHandle) {
        self.close(&ticket, Request::Upload);
        self.handle = Some(handle);
        self.phase = Phase::Uploaded;
        self.status = Some(StatusLine::Uploaded);
        self.results = None;
    }

    /// Start an analysis of the stored handle. `None` without a handle.
    pub fn begin_analyze(&mut self) -> Option<(Ticket, FileHandle)> {
        if self.is_busy() {
            return None;
        }
        let handle = self.handle.clone()?;
        Some((self.open(Request::Analyze), handle))
    }

    pub fn complete_analyze(&mut self, ticket: Ticket, results: RenderedResults) {
        self.close(&ticket, Request::Analyze);
        self.phase = Phase::Analyzed;
        self.results = Some(results);
    }

    /// Start a snapshot export of the rendered results.
    pub fn begin_export(&mut self) -> Option<(Ticket, RenderedResults)> {
        if self.is_busy() || self.phase != Phase::Analyzed {
            return None;
        }
        let results = self.results.clone().filter(|r| !r.is_empty())?;
        Some((self.open(Request::Export), results))
    }

    pub fn complete_export(&mut self, ticket: Ticket) {
        self.close(&ticket, Request::Export);
    }

    /// Undo a started call, leaving the session as it was before `begin_*`.
    pub fn abort(&mut self, ticket: Ticket) {
        self.in_flight = None;
        self.status = ticket.prior_status;
    }

    fn open(&mut self, request: Request) -> Ticket {
        self.in_flight = Some(request);
        Ticket {
            request,
            prior_status: self.status,
        }
    }

    fn close(&mut self, ticket: &Ticket, expected: Request) {
        debug_assert_eq!(ticket.request, expected);
        self.in_flight = None;
    }
}
