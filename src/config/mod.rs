pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::progress::ProgressSettings;
#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, ExportFormat};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "osint-report")]
#[command(about = "Domain OSINT lookup: validate a domain, analyze it and export the report")]
pub struct CliConfig {
    /// Domain or URL to analyze (scheme, www., path and port are stripped)
    pub domain: Option<String>,

    #[arg(long, default_value = "http://localhost:5000")]
    pub api_base_url: String,

    #[arg(long, default_value = "./reports")]
    pub output_path: String,

    /// Export the report after a successful analysis
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// TOML configuration file; overrides the backend and output flags
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only check the domain format, without contacting the backend
    #[arg(long)]
    pub check: bool,

    /// Query the backend health endpoint and exit
    #[arg(long)]
    pub health: bool,

    /// Print the rendered report fragment to stdout
    #[arg(long)]
    pub print_html: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn progress_settings(&self) -> ProgressSettings {
        ProgressSettings::default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_api_base_url("api_base_url", &self.api_base_url)?;
        validation::validate_output_dir("output_path", &self.output_path)?;
        Ok(())
    }
}
