use crate::core::progress::ProgressSettings;
use crate::core::ConfigProvider;
use crate::utils::error::{OsintError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

const DEFAULT_OUTPUT_PATH: &str = "./reports";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub backend: BackendConfig,
    pub export: Option<ExportConfig>,
    pub progress: Option<ProgressConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub tick_ms: Option<u64>,
    pub max_increment: Option<f64>,
    pub cap: Option<f64>,
    pub reset_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| OsintError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OSINT_API_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_api_base_url("backend.base_url", &self.backend.base_url)?;
        validation::validate_output_dir("export.output_path", self.output_path())?;

        if let Some(progress) = &self.progress {
            if let Some(tick_ms) = progress.tick_ms {
                validation::validate_tick_ms("progress.tick_ms", tick_ms)?;
            }
            if let Some(max_increment) = progress.max_increment {
                validation::validate_range("progress.max_increment", max_increment, 0.0, 100.0)?;
            }
            if let Some(cap) = progress.cap {
                // 100% 保留給請求真正完成的時候
                validation::validate_range("progress.cap", cap, 0.0, 99.0)?;
            }
        }

        Ok(())
    }

    pub fn output_path(&self) -> &str {
        self.export
            .as_ref()
            .and_then(|e| e.output_path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or(LogFormat::Compact)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.backend.base_url
    }

    fn output_path(&self) -> &str {
        self.output_path()
    }

    fn progress_settings(&self) -> ProgressSettings {
        let defaults = ProgressSettings::default();
        let Some(progress) = &self.progress else {
            return defaults;
        };

        ProgressSettings {
            tick: progress
                .tick_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick),
            max_increment: progress.max_increment.unwrap_or(defaults.max_increment),
            cap: progress.cap.unwrap_or(defaults.cap),
            reset_delay: progress
                .reset_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.reset_delay),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
