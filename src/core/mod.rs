pub mod controller;
pub mod normalizer;
pub mod progress;
pub mod renderer;

pub use crate::domain::model::{AnalysisReport, DomainString, ExportFormat, UiState};
pub use crate::domain::ports::{AnalysisBackend, ConfigProvider, ReportView, Storage};
pub use crate::utils::error::Result;
