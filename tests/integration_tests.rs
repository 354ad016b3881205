mod common;

use common::{fast_progress, sample_report, RecordingView};
use httpmock::prelude::*;
use osint_report::core::{ExportFormat, UiState};
use osint_report::{AnalysisController, HttpAnalysisBackend, LocalStorage, OsintError};
use std::sync::Arc;
use tempfile::TempDir;

fn build(
    base_url: &str,
    output_path: &str,
) -> (
    AnalysisController<HttpAnalysisBackend, LocalStorage, RecordingView>,
    Arc<RecordingView>,
) {
    let view = Arc::new(RecordingView::default());
    let controller = AnalysisController::with_progress(
        HttpAnalysisBackend::new(base_url),
        LocalStorage::new(output_path.to_string()),
        Arc::clone(&view),
        fast_progress(),
    );
    (controller, view)
}

#[tokio::test]
async fn test_end_to_end_analysis_and_html_export() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/osint/analyze")
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"domain": "example.com"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(sample_report("example.com"));
    });

    let (controller, view) = build(&server.base_url(), &output_path);

    let report = controller
        .submit("HTTPS://www.Example.com/some/page?x=1")
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(report.domain, "example.com");
    assert_eq!(controller.state(), UiState::Displaying);

    {
        let reports = view.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        let fragment = &reports[0];
        assert!(fragment.contains("ACME Registrar, Inc."));
        assert!(fragment.contains("clientDeleteProhibited, clientTransferProhibited"));
        assert!(fragment.contains(
            "<p>The domain is registered through ACME.</p><p>No personal data is exposed.</p>"
        ));
    }

    let exported = controller.export_current(ExportFormat::Html).await.unwrap();
    assert_eq!(exported.filename, "osint_report_example.com.html");

    let full_path = temp_dir.path().join("osint_report_example.com.html");
    assert!(full_path.exists());

    let document = std::fs::read_to_string(&full_path).unwrap();
    assert_eq!(document.len(), exported.bytes);
    assert!(document.starts_with("<!DOCTYPE html>"));
    assert!(document.contains("<title>OSINT Report - example.com</title>"));
    assert!(document.contains("A.IANA-SERVERS.NET, B.IANA-SERVERS.NET"));
    assert!(document.contains("All information was collected from public sources."));
    assert!(!document.contains("<link"));
}

#[tokio::test]
async fn test_invalid_domain_never_reaches_backend() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/osint/analyze");
        then.status(200).json_body(sample_report("example.com"));
    });

    let (controller, view) = build(&server.base_url(), "./unused");

    for input in ["", "   ", "-bad.com", "a.c", "sub.example.com"] {
        let err = controller.submit(input).await.unwrap_err();
        assert!(matches!(err, OsintError::ValidationError { .. }), "input {:?}", input);
        assert_eq!(controller.state(), UiState::Error);
    }

    api_mock.assert_hits(0);
    assert_eq!(view.errors.lock().unwrap().len(), 5);
    assert!(view.submit_enabled.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_error_message_is_surfaced() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/osint/analyze");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"error": "Erro ao buscar WHOIS: timeout"}));
    });

    let (controller, view) = build(&server.base_url(), "./unused");

    let err = controller.submit("example.com").await.unwrap_err();

    api_mock.assert();
    match err {
        OsintError::BackendError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Erro ao buscar WHOIS: timeout");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(controller.state(), UiState::Error);
    assert!(controller.current_analysis().is_none());
    assert_eq!(*view.submit_enabled.lock().unwrap(), vec![false, true]);
    assert_eq!(view.frames.lock().unwrap().last().unwrap().percent, 100.0);
    assert!(view.errors.lock().unwrap()[0].contains("Erro ao buscar WHOIS: timeout"));
}

#[tokio::test]
async fn test_backend_error_without_json_body_uses_generic_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/osint/analyze");
        then.status(502).body("Bad Gateway");
    });

    let (controller, _) = build(&server.base_url(), "./unused");

    let err = controller.submit("example.com").await.unwrap_err();

    assert!(matches!(
        err,
        OsintError::BackendError { status: 502, ref message } if message == "Analysis failed"
    ));
}

#[tokio::test]
async fn test_malformed_success_body_is_network_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/osint/analyze");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{not json");
    });

    let (controller, _) = build(&server.base_url(), "./unused");

    let err = controller.submit("example.com").await.unwrap_err();

    assert!(matches!(err, OsintError::NetworkError { .. }));
    assert_eq!(controller.state(), UiState::Error);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // 連接埠 1 上不會有服務在監聽
    let (controller, view) = build("http://127.0.0.1:1", "./unused");

    let err = controller.submit("example.com").await.unwrap_err();

    assert!(matches!(err, OsintError::NetworkError { .. }));
    assert_eq!(*view.submit_enabled.lock().unwrap(), vec![false, true]);
}

#[tokio::test]
async fn test_whois_error_report_renders_error_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/osint/analyze");
        then.status(200).json_body(serde_json::json!({
            "domain": "example.com",
            "timestamp": "2024-05-01T10:20:30",
            "whois_data": {"error": "No match for domain"},
            "extracted_info": {},
            "gemini_analysis": null,
            "disclaimer": "Public sources only."
        }));
    });

    let (controller, view) = build(&server.base_url(), "./unused");
    controller.submit("example.com").await.unwrap();

    let reports = view.reports.lock().unwrap();
    assert!(reports[0].contains("Failed to retrieve WHOIS data: No match for domain"));
    assert!(reports[0].contains("No additional information extracted from WHOIS data."));
    assert!(reports[0].contains("Analysis not available."));
}

#[tokio::test]
async fn test_pdf_export_has_no_side_effects() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("reports");

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/osint/analyze");
        then.status(200).json_body(sample_report("example.com"));
    });

    let (controller, _) = build(&server.base_url(), output_path.to_str().unwrap());
    controller.submit("example.com").await.unwrap();

    let err = controller.export_current(ExportFormat::Pdf).await.unwrap_err();

    assert!(matches!(err, OsintError::NotImplementedError { .. }));
    api_mock.assert_hits(1);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start();
    let health_mock = server.mock(|when, then| {
        when.method(GET).path("/api/osint/health");
        then.status(200).json_body(serde_json::json!({
            "status": "ok",
            "timestamp": "2024-05-01T10:20:30"
        }));
    });

    let backend = HttpAnalysisBackend::new(&server.base_url());
    let health = backend.health().await.unwrap();

    health_mock.assert();
    assert_eq!(health.status, "ok");
    assert_eq!(health.timestamp.as_deref(), Some("2024-05-01T10:20:30"));
}

#[tokio::test]
async fn test_health_check_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/osint/health");
        then.status(503)
            .json_body(serde_json::json!({"error": "maintenance"}));
    });

    let backend = HttpAnalysisBackend::new(&server.base_url());
    let err = backend.health().await.unwrap_err();

    assert!(matches!(
        err,
        OsintError::BackendError { status: 503, ref message } if message == "maintenance"
    ));
}
