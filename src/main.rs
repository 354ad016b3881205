use clap::Parser;
use osint_report::config::toml_config::LogFormat;
use osint_report::core::normalizer::InputIndicator;
use osint_report::core::ConfigProvider;
use osint_report::utils::error::ErrorSeverity;
use osint_report::utils::{logger, validation};
use osint_report::utils::validation::Validate;
use osint_report::{
    AnalysisController, CliConfig, HttpAnalysisBackend, LocalStorage, OsintError, TerminalView,
    TomlConfig,
};
use std::sync::Arc;

/// 根據錯誤嚴重程度決定退出碼
fn exit_code(error: &OsintError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(error: OsintError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error).max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            std::process::exit(1);
        }
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    let json_logs = cli.json_logs
        || file_config
            .as_ref()
            .is_some_and(|c| c.log_format() == LogFormat::Json);
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting osint-report CLI");
    tracing::debug!("CLI config: {:?}", cli);

    // 設定檔優先於命令列預設值
    let provider: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };
    let validated = match &file_config {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validated {
        eprintln!("❌ {}", e.user_friendly_message());
        fail(e);
    }

    if cli.check {
        let raw = match validation::validate_required_field("domain", &cli.domain) {
            Ok(raw) => raw,
            Err(e) => fail(e),
        };
        let view = TerminalView::new(false);
        let backend = HttpAnalysisBackend::new(provider.api_base_url());
        let storage = LocalStorage::new(provider.output_path().to_string());
        let controller = AnalysisController::new(backend, storage, Arc::new(view));
        if controller.check_input(raw) != InputIndicator::Valid {
            std::process::exit(2);
        }
        return Ok(());
    }

    let backend = HttpAnalysisBackend::new(provider.api_base_url());

    if cli.health {
        match backend.health().await {
            Ok(health) => {
                println!(
                    "✅ Backend status: {} ({})",
                    health.status,
                    health.timestamp.as_deref().unwrap_or("no timestamp")
                );
                return Ok(());
            }
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                fail(e);
            }
        }
    }

    let raw = match validation::validate_required_field("domain", &cli.domain) {
        Ok(raw) => raw.clone(),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            fail(e);
        }
    };

    let storage = LocalStorage::new(provider.output_path().to_string());
    let view = Arc::new(TerminalView::new(cli.print_html));
    let controller = AnalysisController::with_progress(
        backend,
        storage.clone(),
        view,
        provider.progress_settings(),
    );

    // 失敗時 view 已經顯示過錯誤訊息
    let report = match controller.submit(&raw).await {
        Ok(report) => report,
        Err(e) => fail(e),
    };
    println!("✅ Analysis completed for {}", report.domain);

    if let Some(format) = cli.export {
        match controller.export_current(format).await {
            Ok(exported) => {
                println!(
                    "📁 Report saved to: {}",
                    storage.full_path(&exported.filename).display()
                );
            }
            Err(e) => {
                if exit_code(&e) > 0 {
                    fail(e);
                }
                tracing::warn!("Export skipped: {}", e);
            }
        }
    }

    Ok(())
}
