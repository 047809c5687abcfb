use crate::consolidation::policies::MergePolicy;
use std::path::PathBuf;

/// ScanRequest - Internal request DTO for the consolidation use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Root of the tree to walk
    pub root_path: PathBuf,
    /// Extra folder-name patterns to prune, on top of the built-in ones
    pub exclude_patterns: Vec<String>,
    /// How conflicting entries for the same package are resolved
    pub merge_policy: MergePolicy,
    /// Only discover folders; do not run the scanner
    pub dry_run: bool,
}

impl ScanRequest {
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            exclude_patterns: Vec::new(),
            merge_policy: MergePolicy::default(),
            dry_run: false,
        }
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn add_exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
