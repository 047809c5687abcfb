use crate::application::dto::ScanResponse;
use crate::ports::outbound::RequirementsFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Report<'a> {
    packages: Vec<Package<'a>>,
    scanned: Vec<Scanned<'a>>,
    failed: Vec<Failed<'a>>,
    skipped_lines: usize,
}

#[derive(Debug, Serialize)]
struct Package<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<String>,
    requirement: String,
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct Scanned<'a> {
    directory: &'a str,
    entries: usize,
}

#[derive(Debug, Serialize)]
struct Failed<'a> {
    directory: &'a str,
    reason: &'a str,
}

/// JsonReportFormatter adapter producing a machine-readable run report
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementsFormatter for JsonReportFormatter {
    fn format(&self, response: &ScanResponse) -> Result<String> {
        let report = Report {
            packages: response
                .requirements
                .iter()
                .map(|entry| Package {
                    name: entry.name().as_str(),
                    constraint: entry.constraint().map(ToString::to_string),
                    requirement: entry.to_string(),
                    source: entry.source(),
                })
                .collect(),
            scanned: response
                .scanned
                .iter()
                .map(|directory| Scanned {
                    directory: &directory.label,
                    entries: directory.entry_count,
                })
                .collect(),
            failed: response
                .failed
                .iter()
                .map(|directory| Failed {
                    directory: &directory.label,
                    reason: &directory.reason,
                })
                .collect(),
            skipped_lines: response.skipped_lines,
        };

        let mut json = serde_json::to_string_pretty(&report)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON report: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}
