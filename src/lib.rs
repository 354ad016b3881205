pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use adapters::terminal::TerminalView;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpAnalysisBackend;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::controller::AnalysisController;
pub use utils::error::{OsintError, Result};
