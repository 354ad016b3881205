use crate::utils::error::{OsintError, Result};
use std::path::Path;
use url::Url;

// 超過一分鐘的進度更新間隔幾乎一定是單位寫錯
const MAX_TICK_MS: u64 = 60_000;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// 設定檔中未設定的 ${VAR} 會原樣保留下來
fn has_unresolved_placeholder(value: &str) -> bool {
    value.contains("${")
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> OsintError {
    OsintError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Checks the analysis service root. Endpoint paths are appended to it, so it
/// must be an absolute http(s) URL without query or fragment.
pub fn validate_api_base_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "API base URL cannot be empty"));
    }
    if has_unresolved_placeholder(url_str) {
        return Err(invalid(
            field_name,
            url_str,
            "Environment variable placeholder was not substituted",
        ));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(invalid(field_name, url_str, "URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "API paths are appended to this URL, so it cannot carry a query or fragment",
        ));
    }
    Ok(())
}

/// Checks the directory exported reports are written to. It may not exist yet,
/// but if it does it has to be a directory.
pub fn validate_output_dir(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Output directory cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    if has_unresolved_placeholder(path) {
        return Err(invalid(
            field_name,
            path,
            "Environment variable placeholder was not substituted",
        ));
    }

    let dir = Path::new(path);
    if dir.exists() && !dir.is_dir() {
        return Err(invalid(field_name, path, "Path exists and is not a directory"));
    }
    Ok(())
}

/// Progress tick interval in milliseconds.
pub fn validate_tick_ms(field_name: &str, tick_ms: u64) -> Result<()> {
    if !(1..=MAX_TICK_MS).contains(&tick_ms) {
        return Err(invalid(
            field_name,
            &tick_ms.to_string(),
            format!("Tick must be between 1 and {} ms", MAX_TICK_MS),
        ));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| OsintError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 也會落在這裡
    if !(value >= min && value <= max) {
        return Err(OsintError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
