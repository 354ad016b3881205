use crate::core::normalizer::InputIndicator;
use crate::core::progress::ProgressFrame;
use crate::core::ReportView;
use crate::utils::error::OsintError;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Terminal rendition of the report page: progress bar on stderr, report
/// markup on stdout, errors on stderr.
#[derive(Default)]
pub struct TerminalView {
    bar: Mutex<Option<ProgressBar>>,
    print_report: bool,
}

impl TerminalView {
    pub fn new(print_report: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            print_report,
        }
    }

    fn new_bar() -> ProgressBar {
        let bar = ProgressBar::new(100);
        if let Ok(style) =
            ProgressStyle::with_template("{msg:28} [{bar:40.cyan/blue}] {pos:>3}%")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }
}

impl ReportView for TerminalView {
    fn set_submit_enabled(&self, enabled: bool) {
        tracing::trace!("Submit control enabled: {}", enabled);
    }

    fn show_progress(&self, frame: ProgressFrame) {
        let Ok(mut bar) = self.bar.lock() else { return };
        let bar = bar.get_or_insert_with(Self::new_bar);
        bar.set_position(frame.percent.round().clamp(0.0, 100.0) as u64);
        if let Some(label) = frame.label {
            bar.set_message(label);
        }
    }

    fn hide_progress(&self) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(bar) = bar.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn show_report(&self, html: &str) {
        self.hide_progress();
        if self.print_report {
            println!("{}", html);
        }
    }

    fn notify_error(&self, error: &OsintError) {
        self.hide_progress();
        eprintln!("❌ {}", error.user_friendly_message());
    }

    fn set_input_indicator(&self, indicator: InputIndicator) {
        match indicator {
            InputIndicator::Neutral => eprintln!("… no domain entered"),
            InputIndicator::Valid => eprintln!("✅ domain format looks valid"),
            InputIndicator::Invalid => eprintln!("❌ invalid domain format"),
        }
    }
}
