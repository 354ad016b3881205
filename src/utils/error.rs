use thiserror::Error;

/// Why a domain was rejected before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    EmptyDomain,
    BadFormat,
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationFailure::EmptyDomain => write!(f, "empty domain"),
            ValidationFailure::BadFormat => write!(f, "bad format"),
        }
    }
}

#[derive(Error, Debug)]
pub enum OsintError {
    #[error("Validation error: {kind}")]
    ValidationError { kind: ValidationFailure },

    #[error("Backend error ({status}): {message}")]
    BackendError { status: u16, message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("No analysis available to export")]
    NoAnalysisError,

    #[error("{feature} is not implemented yet")]
    NotImplementedError { feature: String },

    #[error("An analysis request is already in flight")]
    RequestInFlight,

    #[error("Unknown export format: {format}")]
    UnknownExportFormat { format: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl From<reqwest::Error> for OsintError {
    fn from(err: reqwest::Error) -> Self {
        OsintError::NetworkError {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Backend,
    Network,
    Export,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OsintError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            OsintError::ValidationError { .. } | OsintError::RequestInFlight => {
                ErrorCategory::Validation
            }
            OsintError::BackendError { .. } => ErrorCategory::Backend,
            OsintError::NetworkError { .. } => ErrorCategory::Network,
            OsintError::NoAnalysisError
            | OsintError::NotImplementedError { .. }
            | OsintError::UnknownExportFormat { .. } => ErrorCategory::Export,
            OsintError::ConfigError { .. }
            | OsintError::InvalidConfigValueError { .. }
            | OsintError::MissingConfigError { .. } => ErrorCategory::Configuration,
            OsintError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OsintError::RequestInFlight | OsintError::NotImplementedError { .. } => {
                ErrorSeverity::Low
            }
            OsintError::ValidationError { .. }
            | OsintError::NoAnalysisError
            | OsintError::UnknownExportFormat { .. } => ErrorSeverity::Medium,
            OsintError::BackendError { .. }
            | OsintError::NetworkError { .. }
            | OsintError::ConfigError { .. }
            | OsintError::InvalidConfigValueError { .. }
            | OsintError::MissingConfigError { .. } => ErrorSeverity::High,
            OsintError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            OsintError::ValidationError {
                kind: ValidationFailure::EmptyDomain,
            } => "Please enter a valid domain.".to_string(),
            OsintError::ValidationError {
                kind: ValidationFailure::BadFormat,
            } => "Invalid domain format. Use the format: example.com".to_string(),
            OsintError::BackendError { message, .. } => {
                format!("Error analyzing domain: {}", message)
            }
            OsintError::NetworkError { message } => {
                format!("Error analyzing domain: {}", message)
            }
            OsintError::NoAnalysisError => "No analysis available to export.".to_string(),
            OsintError::NotImplementedError { feature } => {
                format!("{} will be available soon.", feature)
            }
            OsintError::RequestInFlight => {
                "An analysis is already running, please wait for it to finish.".to_string()
            }
            OsintError::UnknownExportFormat { format } => {
                format!("Unknown export format '{}'.", format)
            }
            OsintError::IoError(e) => format!("Error exporting report: {}", e),
            OsintError::ConfigError { .. }
            | OsintError::InvalidConfigValueError { .. }
            | OsintError::MissingConfigError { .. } => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Enter a single-label domain such as example.com (subdomains are not supported)"
            }
            ErrorCategory::Backend => "Check the backend logs or try again later",
            ErrorCategory::Network => "Check that the analysis backend is reachable",
            ErrorCategory::Export => "Run an analysis first and export it as html",
            ErrorCategory::Configuration => "Check the command-line flags and the TOML config file",
            ErrorCategory::System => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, OsintError>;
