use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::components::{NoticeDialog, PageNotifier};
use crate::core::backend::HttpBackend;
use crate::core::controller::{Controller, ExportOutcome};
use crate::core::protocol::UploadFile;
use crate::core::session::{Request, Session, StatusLine};
use crate::core::AppConfig;
use crate::results::{ChartMounts, PlotlyRenderer, PngExporter, YearList, PLOTLY_CDN};
use crate::t;

enum AnalyzerEvent {
    FileChosen(UploadFile),
    FileUnreadable(String),
    Analyze,
    Download,
}

/// The upload → analyze → render page.
///
/// UI events go to a single coroutine owning the [`Controller`], so calls
/// run one after another; the session signal drives what is shown.
#[component]
pub fn Analyzer() -> Element {
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let config = use_hook(AppConfig::load);
    let session = use_signal(Session::new);
    let pending_notice = use_signal(|| Option::<String>::None);
    let feedback = use_signal(|| Option::<ExportOutcome>::None);
    let notifier = PageNotifier::new(pending_notice);

    let events = {
        let config = config.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<AnalyzerEvent>| {
            let config = config.clone();
            let mut feedback_signal = feedback;
            async move {
                let backend = HttpBackend::new(config.api.clone());
                let controller = Controller::new(
                    config,
                    backend,
                    PlotlyRenderer,
                    notifier,
                    PngExporter,
                    session,
                );

                while let Some(event) = rx.next().await {
                    match event {
                        AnalyzerEvent::FileChosen(file) => {
                            feedback_signal.set(None);
                            controller.on_file_selected(file).await;
                        }
                        AnalyzerEvent::FileUnreadable(name) => controller.on_file_unreadable(&name),
                        AnalyzerEvent::Analyze => controller.on_analyze_triggered().await,
                        AnalyzerEvent::Download => {
                            feedback_signal.set(None);
                            let outcome = controller.on_download_triggered().await;
                            feedback_signal.set(outcome);
                        }
                    }
                }
            }
        })
    };

    let on_file = move |evt: FormEvent| async move {
        if session.read().is_busy() {
            return;
        }
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => events.send(AnalyzerEvent::FileChosen(UploadFile::new(name, bytes))),
            None => events.send(AnalyzerEvent::FileUnreadable(name)),
        }
    };

    let state = session();
    let busy = state.is_busy();
    let in_flight = state.in_flight();

    let status_text = match state.status() {
        Some(StatusLine::Uploading) => t!("status-uploading"),
        Some(StatusLine::Uploaded) => t!("status-uploaded"),
        None => String::new(),
    };
    let analyze_label = if in_flight == Some(Request::Analyze) {
        t!("analyze-busy")
    } else {
        t!("analyze-button")
    };
    let download_label = if in_flight == Some(Request::Export) {
        t!("export-busy")
    } else {
        t!("download-button")
    };
    let feedback_line = feedback().map(|outcome| match outcome {
        ExportOutcome::Saved(path) => t!("export-saved", path = path),
        ExportOutcome::DownloadStarted => t!("export-started"),
    });

    let upload_class = if state.upload_visible() {
        "analysis__upload"
    } else {
        "analysis__upload is-hidden"
    };
    let results_class = if state.results_visible() {
        "analysis__results"
    } else {
        "analysis__results is-collapsed"
    };
    let years = state
        .results()
        .map(|results| results.years.clone())
        .unwrap_or_default();
    let export_enabled = config.export.enabled;

    rsx! {
        document::Script { src: PLOTLY_CDN }

        section { class: "page page-analyzer",
            div { style: "display:none", "{_lang_marker}" }

            div { id: "uploadContainer", class: "{upload_class}",
                label {
                    r#for: "fileInput",
                    class: "button button--primary",
                    {t!("upload-label")}
                }
                input {
                    id: "fileInput",
                    class: "visually-hidden",
                    r#type: "file",
                    accept: ".csv,text/csv",
                    disabled: busy,
                    onchange: on_file,
                }
                p { class: "analysis__hint", {t!("upload-hint")} }
            }

            if state.status_visible() {
                p { id: "statusMessage", class: "analysis__status", "{status_text}" }
            }

            if state.analyze_visible() {
                button {
                    id: "analyzeButton",
                    class: "button button--accent",
                    disabled: busy,
                    onclick: move |_| events.send(AnalyzerEvent::Analyze),
                    "{analyze_label}"
                }
            }

            div { id: "analysisResult", class: "{results_class}",
                h2 { class: "analysis__heading", {t!("results-heading")} }
                YearList { years }
                ChartMounts { slots: config.results.charts.clone() }
            }

            if state.download_visible(export_enabled) {
                div { class: "analysis__export",
                    button {
                        id: "downloadButton",
                        class: "button button--ghost",
                        disabled: busy,
                        onclick: move |_| events.send(AnalyzerEvent::Download),
                        "{download_label}"
                    }
                    if let Some(line) = feedback_line {
                        p { class: "analysis__feedback", "{line}" }
                    }
                }
            }

            NoticeDialog { notifier }
        }
    }
}
