use crate::core::normalizer::InputIndicator;
use crate::core::progress::{ProgressSettings, ProgressSimulator};
use crate::core::renderer::{render_document, render_fragment};
use crate::domain::model::{AnalysisReport, DomainString, ExportFormat, ExportedReport, UiState};
use crate::domain::ports::{AnalysisBackend, ReportView, Storage};
use crate::utils::error::{OsintError, Result};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Session {
    state: UiState,
    current: Option<AnalysisReport>,
}

/// Re-enables the submit control when a loading submission ends, including
/// when the caller drops it mid-request.
struct InFlight<'a, V: ReportView> {
    session: &'a Mutex<Session>,
    view: &'a V,
}

impl<V: ReportView> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        let mut session = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // 只有被中途放棄時狀態才會停在 Loading
        if session.state == UiState::Loading {
            tracing::warn!("Analysis request was abandoned before completing");
            session.state = UiState::Idle;
        }
        drop(session);
        self.view.set_submit_enabled(true);
    }
}

/// Drives one search at a time: validation, the request, progress and
/// rendering. Holds the last successful report for export.
pub struct AnalysisController<B: AnalysisBackend, S: Storage, V: ReportView + 'static> {
    backend: B,
    storage: S,
    view: Arc<V>,
    progress: ProgressSimulator,
    session: Mutex<Session>,
}

impl<B: AnalysisBackend, S: Storage, V: ReportView + 'static> AnalysisController<B, S, V> {
    pub fn new(backend: B, storage: S, view: Arc<V>) -> Self {
        Self::with_progress(backend, storage, view, ProgressSettings::default())
    }

    pub fn with_progress(backend: B, storage: S, view: Arc<V>, settings: ProgressSettings) -> Self {
        Self {
            backend,
            storage,
            view,
            progress: ProgressSimulator::new(settings),
            session: Mutex::new(Session::default()),
        }
    }

    // 鎖只在同步區段持有，不會跨越 await
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> UiState {
        self.session().state
    }

    pub fn current_analysis(&self) -> Option<AnalysisReport> {
        self.session().current.clone()
    }

    /// Updates the input's valid/invalid hint without submitting anything.
    pub fn check_input(&self, raw_input: &str) -> InputIndicator {
        let indicator = InputIndicator::for_input(raw_input);
        self.view.set_input_indicator(indicator);
        indicator
    }

    /// Validates `raw_input`, runs the analysis and displays the result.
    ///
    /// Rejected with [`OsintError::RequestInFlight`] while another submission
    /// is loading; that rejection touches neither the view nor the session.
    pub async fn submit(&self, raw_input: &str) -> Result<AnalysisReport> {
        let domain = {
            let mut session = self.session();
            if session.state == UiState::Loading {
                tracing::debug!("Ignoring submit while a request is in flight");
                return Err(OsintError::RequestInFlight);
            }

            session.state = UiState::Validating;
            match DomainString::parse(raw_input) {
                Ok(domain) => {
                    session.state = UiState::Loading;
                    domain
                }
                Err(e) => {
                    session.state = UiState::Error;
                    drop(session);
                    tracing::warn!("Rejected input {:?}: {}", raw_input, e);
                    self.view.notify_error(&e);
                    return Err(e);
                }
            }
        };

        tracing::info!("Starting OSINT analysis for: {}", domain);
        self.view.set_submit_enabled(false);
        let _in_flight = InFlight {
            session: &self.session,
            view: self.view.as_ref(),
        };
        let progress = self.progress.start(Arc::clone(&self.view));

        let outcome = self.backend.analyze(&domain).await;

        // 請求一結束就停止進度動畫，不論成功或失敗
        progress.finish();

        match outcome {
            Ok(report) => {
                let html = render_fragment(&report);
                {
                    let mut session = self.session();
                    session.current = Some(report.clone());
                    session.state = UiState::Displaying;
                }
                tracing::info!("Analysis completed for: {}", report.domain);
                self.view.show_report(&html);
                Ok(report)
            }
            Err(e) => {
                self.session().state = UiState::Error;
                tracing::error!("Analysis failed for {}: {}", domain, e);
                self.view.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Writes the current report in `format`. PDF is not supported and fails
    /// without touching storage.
    pub async fn export_current(&self, format: ExportFormat) -> Result<ExportedReport> {
        let result = self.export_inner(format).await;
        if let Err(e) = &result {
            tracing::error!("Export failed: {}", e);
            self.view.notify_error(e);
        }
        result
    }

    async fn export_inner(&self, format: ExportFormat) -> Result<ExportedReport> {
        if format == ExportFormat::Pdf {
            return Err(OsintError::NotImplementedError {
                feature: "PDF export".to_string(),
            });
        }

        let report = self.current_analysis().ok_or(OsintError::NoAnalysisError)?;
        let document = render_document(&report);
        let filename = ExportedReport::html_filename(&report.domain);

        tracing::debug!("Writing {} ({} bytes)", filename, document.len());
        self.storage.write_file(&filename, document.as_bytes()).await?;
        tracing::info!("Report exported to {}", filename);

        Ok(ExportedReport {
            filename,
            content_type: "text/html",
            bytes: document.len(),
        })
    }

    /// Closes the result or error display. No effect while loading.
    pub fn dismiss(&self) {
        let mut session = self.session();
        if session.state != UiState::Loading {
            session.state = UiState::Idle;
        }
    }

    /// Forgets the stored report so nothing is exported until the next search.
    pub fn clear_analysis(&self) {
        let mut session = self.session();
        session.current = None;
        if session.state != UiState::Loading {
            session.state = UiState::Idle;
        }
    }
}
