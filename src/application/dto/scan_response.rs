use crate::consolidation::domain::ConsolidatedRequirements;
use crate::consolidation::services::MergeConflict;

/// A folder pipreqs ran on successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDirectory {
    pub label: String,
    /// Well-formed entries read from the folder's listing
    pub entry_count: usize,
}

/// A folder whose scan produced nothing usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDirectory {
    pub label: String,
    pub reason: String,
}

/// ScanResponse - Internal response DTO from the consolidation use case
///
/// Holds everything the formatters need; the use case itself never writes
/// the final artifact.
#[derive(Debug, Clone, Default)]
pub struct ScanResponse {
    /// Merged, de-duplicated requirements
    pub requirements: ConsolidatedRequirements,
    /// Labels of every folder discovered, in traversal order
    pub discovered: Vec<String>,
    pub scanned: Vec<ScannedDirectory>,
    pub failed: Vec<FailedDirectory>,
    /// Entries dropped by the merge policy
    pub conflicts: Vec<MergeConflict>,
    /// Malformed lines skipped across all listings
    pub skipped_lines: usize,
    /// True when no scanner ran (discovery only)
    pub dry_run: bool,
}

impl ScanResponse {
    pub fn dry_run(discovered: Vec<String>) -> Self {
        Self {
            discovered,
            dry_run: true,
            ..Self::default()
        }
    }
}
