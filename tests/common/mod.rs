#![allow(dead_code)]

use osint_report::core::normalizer::InputIndicator;
use osint_report::core::progress::{ProgressFrame, ProgressSettings};
use osint_report::core::ReportView;
use osint_report::OsintError;
use std::sync::Mutex;
use std::time::Duration;

/// View that records everything the controller asks it to show.
#[derive(Default)]
pub struct RecordingView {
    pub frames: Mutex<Vec<ProgressFrame>>,
    pub reports: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
    pub submit_enabled: Mutex<Vec<bool>>,
}

impl ReportView for RecordingView {
    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.lock().unwrap().push(enabled);
    }

    fn show_progress(&self, frame: ProgressFrame) {
        self.frames.lock().unwrap().push(frame);
    }

    fn hide_progress(&self) {}

    fn show_report(&self, html: &str) {
        self.reports.lock().unwrap().push(html.to_string());
    }

    fn notify_error(&self, error: &OsintError) {
        self.errors.lock().unwrap().push(error.user_friendly_message());
    }

    fn set_input_indicator(&self, _indicator: InputIndicator) {}
}

pub fn fast_progress() -> ProgressSettings {
    ProgressSettings {
        tick: Duration::from_millis(5),
        reset_delay: Duration::from_millis(5),
        ..Default::default()
    }
}

pub fn sample_report(domain: &str) -> serde_json::Value {
    serde_json::json!({
        "domain": domain,
        "timestamp": "2024-05-01T10:20:30.123456",
        "whois_data": {
            "domain_name": "EXAMPLE.COM",
            "registrar": "ACME Registrar, Inc.",
            "creation_date": "1995-08-14T04:00:00",
            "expiration_date": "2030-08-13T04:00:00",
            "status": ["clientDeleteProhibited", "clientTransferProhibited"],
            "name_servers": ["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"],
            "emails": "abuse@acme.example"
        },
        "extracted_info": {
            "emails": ["abuse@acme.example"],
            "names": [],
            "phones": [],
            "addresses": [],
            "organizations": ["ACME Registrar, Inc."]
        },
        "gemini_analysis": "The domain is registered through ACME.\n\nNo personal data is exposed.\n\n",
        "disclaimer": "All information was collected from public sources."
    })
}
