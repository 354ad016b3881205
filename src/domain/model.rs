use crate::core::normalizer::{is_valid_format, normalize};
use crate::utils::error::{OsintError, Result, ValidationFailure};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A normalized, syntactically valid host name such as `example.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainString(String);

impl DomainString {
    /// Normalizes raw user input and checks it against the domain pattern.
    pub fn parse(raw: &str) -> Result<Self> {
        let domain = normalize(raw);
        if domain.is_empty() {
            return Err(OsintError::ValidationError {
                kind: ValidationFailure::EmptyDomain,
            });
        }
        if !is_valid_format(&domain) {
            return Err(OsintError::ValidationError {
                kind: ValidationFailure::BadFormat,
            });
        }
        Ok(Self(domain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// 後端有時會回傳 null 而不是省略欄位
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw WHOIS record as returned by the backend.
///
/// Field values are usually strings or lists of strings, but anything JSON is
/// accepted and rendered best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhoisData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl WhoisData {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)
    }

    /// The lookup error, if the backend reported a non-empty one.
    pub fn lookup_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractedCategory {
    Emails,
    Names,
    Phones,
    Addresses,
    Organizations,
}

impl ExtractedCategory {
    /// Display order used by the renderer.
    pub const ALL: [ExtractedCategory; 5] = [
        ExtractedCategory::Emails,
        ExtractedCategory::Names,
        ExtractedCategory::Phones,
        ExtractedCategory::Addresses,
        ExtractedCategory::Organizations,
    ];
}

/// Entities the backend pulled out of the free-text WHOIS fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organizations: Vec<String>,
}

impl ExtractedInfo {
    pub fn get(&self, category: ExtractedCategory) -> &[String] {
        match category {
            ExtractedCategory::Emails => &self.emails,
            ExtractedCategory::Names => &self.names,
            ExtractedCategory::Phones => &self.phones,
            ExtractedCategory::Addresses => &self.addresses,
            ExtractedCategory::Organizations => &self.organizations,
        }
    }

    pub fn is_empty(&self) -> bool {
        ExtractedCategory::ALL
            .iter()
            .all(|category| self.get(*category).is_empty())
    }
}

/// Response body of `POST /api/osint/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub whois_data: WhoisData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_info: ExtractedInfo,
    #[serde(default)]
    pub gemini_analysis: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disclaimer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Validating,
    Loading,
    Displaying,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Html,
    Pdf,
}

impl FromStr for ExportFormat {
    type Err = OsintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(OsintError::UnknownExportFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Html => f.write_str("html"),
            ExportFormat::Pdf => f.write_str("pdf"),
        }
    }
}

/// What an export wrote to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: usize,
}

impl ExportedReport {
    /// `osint_report_<domain>.html`, with anything that is not a host-name
    /// character replaced so the domain cannot escape the output directory.
    pub fn html_filename(domain: &str) -> String {
        let safe: String = domain
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("osint_report_{}.html", safe.trim_start_matches('.'))
    }
}

/// Response body of `GET /api/osint/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_domain_string_parse() {
        let domain = DomainString::parse("https://www.Example.com/about").unwrap();
        assert_eq!(domain.as_str(), "example.com");
        assert_eq!(serde_json::to_value(&domain).unwrap(), json!("example.com"));
    }

    #[test]
    fn test_domain_string_rejects_empty_and_bad_format() {
        assert!(matches!(
            DomainString::parse("   "),
            Err(OsintError::ValidationError {
                kind: ValidationFailure::EmptyDomain
            })
        ));
        assert!(matches!(
            DomainString::parse("sub.example.com"),
            Err(OsintError::ValidationError {
                kind: ValidationFailure::BadFormat
            })
        ));
    }

    #[test]
    fn test_report_deserializes_backend_payload() {
        let payload = json!({
            "domain": "example.com",
            "timestamp": "2024-05-01T10:20:30.123456",
            "whois_data": {
                "registrar": "ACME Registrar",
                "name_servers": ["ns1.example.com", "ns2.example.com"],
                "dnssec": "unsigned"
            },
            "extracted_info": {
                "emails": ["admin@example.com"],
                "names": [],
                "phones": [],
                "addresses": [],
                "organizations": ["ACME Registrar"]
            },
            "gemini_analysis": "Summary.\n\nDetails.",
            "disclaimer": "Public sources only."
        });

        let report: AnalysisReport = serde_json::from_value(payload).unwrap();

        assert_eq!(report.domain, "example.com");
        assert!(report.whois_data.lookup_error().is_none());
        assert_eq!(report.whois_data.fields.len(), 3);
        assert_eq!(report.extracted_info.emails, vec!["admin@example.com"]);
        assert_eq!(report.gemini_analysis.as_deref(), Some("Summary.\n\nDetails."));
    }

    #[test]
    fn test_report_tolerates_missing_and_null_sections() {
        let payload = json!({
            "domain": "example.com",
            "whois_data": null,
            "extracted_info": {"emails": null},
            "gemini_analysis": null
        });

        let report: AnalysisReport = serde_json::from_value(payload).unwrap();

        assert!(report.whois_data.fields.is_empty());
        assert!(report.extracted_info.is_empty());
        assert!(report.gemini_analysis.is_none());
        assert_eq!(report.disclaimer, "");
    }

    #[test]
    fn test_whois_error_field_is_separated() {
        let whois: WhoisData =
            serde_json::from_value(json!({"error": "lookup timed out"})).unwrap();
        assert_eq!(whois.lookup_error(), Some("lookup timed out"));
        assert!(whois.fields.is_empty());
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("html".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert_eq!(" PDF ".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(OsintError::UnknownExportFormat { .. })
        ));
    }

    #[test]
    fn test_html_filename() {
        assert_eq!(
            ExportedReport::html_filename("example.com"),
            "osint_report_example.com.html"
        );
        assert_eq!(
            ExportedReport::html_filename("../etc/passwd"),
            "osint_report__etc_passwd.html"
        );
    }
}
