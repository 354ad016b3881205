//! HTML rendering of analysis reports.
//!
//! Everything here is pure: the same report always renders to the same markup.
//! Values coming from the backend are escaped before interpolation.

use crate::domain::model::{AnalysisReport, ExtractedCategory, ExtractedInfo, WhoisData};
use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::Value;

/// WHOIS fields shown in the report, in display order.
pub const WHOIS_FIELDS: [(&str, &str); 6] = [
    ("registrar", "Registrar"),
    ("creation_date", "Creation Date"),
    ("expiration_date", "Expiration Date"),
    ("updated_date", "Last Updated"),
    ("status", "Status"),
    ("name_servers", "Name Servers"),
];

pub const NO_EXTRACTED_INFO: &str = "No additional information extracted from WHOIS data.";
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis not available.";

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

const DOCUMENT_STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }
        .header { text-align: center; margin-bottom: 40px; }
        .section { margin-bottom: 30px; }
        .section h2 { color: #1a1a2e; border-bottom: 2px solid #00d4aa; padding-bottom: 10px; }
        .data-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
        .data-item { background: #f8f9fa; padding: 15px; border-radius: 5px; }
        .data-list { list-style: none; padding: 0; }
        .data-list li { background: #e9ecef; margin: 5px 0; padding: 8px; border-radius: 3px; }
        .analysis { background: #f0f8ff; padding: 20px; border-radius: 10px; border-left: 5px solid #00d4aa; }
        .disclaimer { background: #fff3cd; padding: 15px; border-radius: 5px; margin-top: 30px; }
        .error { color: #b00020; }";

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Formats the backend timestamp as `dd/mm/yyyy, HH:MM:SS`.
///
/// Offset-aware timestamps are shown in local time, naive ones as they are.
/// Anything unparsable is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return naive.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}

pub fn render_summary(report: &AnalysisReport) -> String {
    format!(
        r#"<div class="data-grid">
    <div class="data-item">
        <strong>Analyzed Domain:</strong><br>
        {}
    </div>
    <div class="data-item">
        <strong>Analysis Date:</strong><br>
        {}
    </div>
</div>"#,
        escape_html(&report.domain),
        escape_html(&format_timestamp(&report.timestamp))
    )
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(", "),
        other => display_scalar(other),
    }
}

/// WHOIS block: an error line, or one labeled item per allow-listed field.
///
/// With no allow-listed field present the grid is left empty, with no
/// placeholder text.
pub fn render_whois(whois: &WhoisData) -> String {
    if let Some(error) = whois.lookup_error() {
        return format!(
            r#"<p class="error">Failed to retrieve WHOIS data: {}</p>"#,
            escape_html(error)
        );
    }

    let mut html = String::from(r#"<div class="data-grid">"#);
    for (key, label) in WHOIS_FIELDS {
        let Some(value) = whois.get(key).filter(|v| is_truthy(v)) else {
            continue;
        };
        html.push_str(&format!(
            r#"
    <div class="data-item">
        <strong>{}:</strong><br>
        {}
    </div>"#,
            label,
            escape_html(&display_value(value))
        ));
    }
    html.push_str("</div>");
    html
}

fn category_label(category: ExtractedCategory) -> (&'static str, &'static str) {
    match category {
        ExtractedCategory::Emails => ("Emails Found", "fas fa-envelope"),
        ExtractedCategory::Names => ("Identified Names", "fas fa-user"),
        ExtractedCategory::Phones => ("Phone Numbers", "fas fa-phone"),
        ExtractedCategory::Addresses => ("Addresses", "fas fa-map-marker-alt"),
        ExtractedCategory::Organizations => ("Organizations", "fas fa-building"),
    }
}

/// One bullet list per non-empty category, or [`NO_EXTRACTED_INFO`].
pub fn render_extracted(info: &ExtractedInfo) -> String {
    let mut html = String::new();

    for category in ExtractedCategory::ALL {
        let items = info.get(category);
        if items.is_empty() {
            continue;
        }
        let (label, icon) = category_label(category);
        let list: String = items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        html.push_str(&format!(
            r#"
<div class="data-item">
    <strong><i class="{}"></i> {}:</strong>
    <ul class="data-list">{}</ul>
</div>"#,
            icon, label, list
        ));
    }

    if html.is_empty() {
        return format!("<p>{}</p>", NO_EXTRACTED_INFO);
    }
    html
}

/// Splits the narrative on blank lines into `<p>` blocks, dropping empty ones.
pub fn render_analysis_text(text: Option<&str>) -> String {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return format!("<p>{}</p>", ANALYSIS_UNAVAILABLE),
    };

    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| format!("<p>{}</p>", escape_html(paragraph)))
        .collect()
}

/// In-page report: summary, WHOIS, extracted entities, narrative, disclaimer.
pub fn render_fragment(report: &AnalysisReport) -> String {
    format!(
        r#"<div class="report-section">
    <h3><i class="fas fa-info-circle"></i> General Information</h3>
    {summary}
</div>

<div class="report-section">
    <h3><i class="fas fa-database"></i> WHOIS Data</h3>
    {whois}
</div>

<div class="report-section">
    <h3><i class="fas fa-search"></i> Extracted Information</h3>
    {extracted}
</div>

<div class="report-section">
    <h3><i class="fas fa-brain"></i> AI Analysis</h3>
    <div class="gemini-analysis">
        {analysis}
    </div>
</div>

<div class="report-section">
    <h3><i class="fas fa-shield-alt"></i> Disclaimer</h3>
    <p><em>{disclaimer}</em></p>
</div>
"#,
        summary = render_summary(report),
        whois = render_whois(&report.whois_data),
        extracted = render_extracted(&report.extracted_info),
        analysis = render_analysis_text(report.gemini_analysis.as_deref()),
        disclaimer = escape_html(&report.disclaimer),
    )
}

/// Standalone export document. Styles are inlined; nothing is loaded from
/// outside the file.
pub fn render_document(report: &AnalysisReport) -> String {
    let domain = escape_html(&report.domain);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>OSINT Report - {domain}</title>
    <style>
{style}
    </style>
</head>
<body>
    <div class="header">
        <h1>OSINT Analysis Report</h1>
        <p><strong>Domain:</strong> {domain}</p>
        <p><strong>Date:</strong> {timestamp}</p>
    </div>

    <div class="section">
        <h2>WHOIS Data</h2>
        {whois}
    </div>

    <div class="section">
        <h2>Extracted Information</h2>
        {extracted}
    </div>

    <div class="section">
        <h2>AI Analysis</h2>
        <div class="analysis">
            {analysis}
        </div>
    </div>

    <div class="disclaimer">
        <strong>Legal Notice:</strong> {disclaimer}
    </div>
</body>
</html>
"#,
        domain = domain,
        style = DOCUMENT_STYLE,
        timestamp = escape_html(&format_timestamp(&report.timestamp)),
        whois = render_whois(&report.whois_data),
        extracted = render_extracted(&report.extracted_info),
        analysis = render_analysis_text(report.gemini_analysis.as_deref()),
        disclaimer = escape_html(&report.disclaimer),
    )
}
