use crate::core::normalizer::InputIndicator;
use crate::core::progress::{ProgressFrame, ProgressSettings};
use crate::domain::model::{AnalysisReport, DomainString};
use crate::utils::error::{OsintError, Result};
use async_trait::async_trait;

/// Where exported reports end up.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn progress_settings(&self) -> ProgressSettings;
}

/// The analysis service: one request, one report.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, domain: &DomainString) -> Result<AnalysisReport>;
}

/// The page regions the controller drives. Implementations only display what
/// they are given.
pub trait ReportView: Send + Sync {
    fn set_submit_enabled(&self, enabled: bool);
    fn show_progress(&self, frame: ProgressFrame);
    fn hide_progress(&self);
    fn show_report(&self, html: &str);
    fn notify_error(&self, error: &OsintError);
    fn set_input_indicator(&self, _indicator: InputIndicator) {}
}
