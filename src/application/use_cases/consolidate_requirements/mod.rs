use crate::application::dto::{FailedDirectory, ScanRequest, ScanResponse, ScannedDirectory};
use crate::consolidation::domain::{ExcludedDirectory, ProjectDirectory, RequirementEntry};
use crate::consolidation::services::{Consolidator, DirectoryFilter, RequirementParser};
use crate::ports::outbound::{
    DirectoryWalker, ProgressReporter, RequirementsFileReader, RequirementsTool, WalkEvent,
};
use crate::shared::error::SweepError;
use crate::shared::Result;

/// Entries and malformed-line errors read from one folder's listing
type ParsedListing = (Vec<RequirementEntry>, Vec<SweepError>);

/// ConsolidateRequirementsUseCase - walk, scan, normalize, merge
///
/// Folders are processed one at a time. Every per-folder problem is
/// reported and skipped; the run only fails when nothing could be scanned.
///
/// # Type Parameters
/// * `W` - DirectoryWalker implementation
/// * `T` - RequirementsTool implementation
/// * `R` - RequirementsFileReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ConsolidateRequirementsUseCase<W, T, R, PR> {
    walker: W,
    tool: T,
    reader: R,
    progress_reporter: PR,
}

impl<W, T, R, PR> ConsolidateRequirementsUseCase<W, T, R, PR>
where
    W: DirectoryWalker,
    T: RequirementsTool,
    R: RequirementsFileReader,
    PR: ProgressReporter,
{
    /// Creates a new ConsolidateRequirementsUseCase with injected dependencies
    pub fn new(walker: W, tool: T, reader: R, progress_reporter: PR) -> Self {
        Self {
            walker,
            tool,
            reader,
            progress_reporter,
        }
    }

    /// Executes the consolidation use case
    ///
    /// # Errors
    /// - Invalid exclude patterns
    /// - `SweepError::NoDirectoriesScanned` when no folder holds Python
    ///   source or every scan failed
    pub fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Discover project folders
        let directories = self.discover_directories(&request)?;

        if request.dry_run {
            self.progress_reporter
                .report_completion("Success: Dry run finished. No folder was scanned.");
            return Ok(ScanResponse::dry_run(
                directories.iter().map(ProjectDirectory::label).collect(),
            ));
        }

        // Step 2: Run the scanner on each folder and merge the results
        let response = self.scan_directories(&request, directories)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Scanned {}/{} folder(s), {} unique package(s)",
            response.scanned.len(),
            response.discovered.len(),
            response.requirements.len()
        ));

        Ok(response)
    }

    /// Walks the tree and attaches ignore lists to every project folder
    fn discover_directories(&self, request: &ScanRequest) -> Result<Vec<ProjectDirectory>> {
        self.progress_reporter.report(&format!(
            "🔍 Scanning for Python projects under: {}",
            request.root_path.display()
        ));

        let filter = DirectoryFilter::new(request.exclude_patterns.clone())?;

        let mut directories = Vec::new();
        let mut excluded = Vec::new();
        for event in self.walker.walk(&request.root_path, &filter) {
            match event {
                WalkEvent::Project(directory) => directories.push(directory),
                WalkEvent::Excluded(directory) => {
                    tracing::debug!(
                        path = %directory.path.display(),
                        reason = %directory.reason,
                        "pruned folder"
                    );
                    excluded.push(directory);
                }
                WalkEvent::Error(error) => {
                    self.progress_reporter
                        .report_warning(&format!("⚠️  Warning: {}", error));
                }
            }
        }

        for pattern in filter.get_unmatched_patterns() {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any folder.",
                pattern
            ));
        }

        if directories.is_empty() {
            return Err(SweepError::NoDirectoriesScanned {
                root: request.root_path.clone(),
                reason: "No Python source files found outside excluded folders".to_string(),
            }
            .into());
        }

        self.progress_reporter.report(&format!(
            "📂 Found Python source in {} folder(s):",
            directories.len()
        ));
        for directory in &directories {
            self.progress_reporter.report(&format!(
                "   - {}: {} script(s)",
                directory.label(),
                directory.source_file_count()
            ));
        }

        Ok(directories
            .into_iter()
            .map(|directory| {
                let ignored = ignored_folders_below(&directory, &excluded);
                directory.with_ignored_folders(ignored)
            })
            .collect())
    }

    fn scan_directories(
        &self,
        request: &ScanRequest,
        directories: Vec<ProjectDirectory>,
    ) -> Result<ScanResponse> {
        let total = directories.len();
        let mut consolidator = Consolidator::new(request.merge_policy);
        let mut response = ScanResponse {
            discovered: directories.iter().map(ProjectDirectory::label).collect(),
            ..ScanResponse::default()
        };

        for (index, directory) in directories.iter().enumerate() {
            let label = directory.label();
            self.progress_reporter.report_progress(index, total, Some(&label));

            match self.scan_directory(directory) {
                Ok((entries, errors)) => {
                    if entries.is_empty() && errors.is_empty() {
                        self.progress_reporter.report(&format!(
                            "ℹ️  No requirements found in {} (no imports detected)",
                            label
                        ));
                    }
                    for error in &errors {
                        self.progress_reporter
                            .report_warning(&format!("⚠️  Warning: {}", error));
                    }
                    response.skipped_lines += errors.len();
                    response.scanned.push(ScannedDirectory {
                        label,
                        entry_count: entries.len(),
                    });
                    consolidator.add_all(entries);
                }
                Err(error) => {
                    self.progress_reporter.report_warning(&format!(
                        "⚠️  Warning: Skipping {}: {}",
                        label, error
                    ));
                    response.failed.push(FailedDirectory {
                        label,
                        reason: first_line(&error.to_string()),
                    });
                }
            }
        }
        self.progress_reporter.report_progress(total, total, None);

        if response.scanned.is_empty() {
            return Err(SweepError::NoDirectoriesScanned {
                root: request.root_path.clone(),
                reason: format!("All {} scan(s) failed", total),
            }
            .into());
        }

        let (requirements, conflicts) = consolidator.finish();
        for conflict in &conflicts {
            self.progress_reporter
                .report(&format!("🔀 {}: {}", conflict.kept.name(), conflict));
        }
        response.requirements = requirements;
        response.conflicts = conflicts;

        Ok(response)
    }

    /// Runs the tool on one folder and parses its normalized output
    fn scan_directory(&self, directory: &ProjectDirectory) -> Result<ParsedListing> {
        let output_path = self.tool.generate(directory)?;
        let decoded = self.reader.read_requirements(&output_path)?;

        if decoded.used_fallback() {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Warning: Output for {} was not valid UTF-8; decoded as {}",
                directory.label(),
                decoded.encoding
            ));
        }

        let parsed = RequirementParser::parse(&decoded.content, &directory.label());
        tracing::debug!(
            folder = %directory.label(),
            entries = parsed.entries.len(),
            malformed = parsed.errors.len(),
            "parsed requirements listing"
        );
        Ok((parsed.entries, parsed.errors))
    }
}

/// Names of pruned folders that sit inside `directory`
///
/// pipreqs matches `--ignore` entries by folder name anywhere below the
/// scanned folder. A folder pruned for holding `pyvenv.cfg` therefore also
/// hides unrelated folders of the same name inside that project. Forwarding
/// it anyway keeps pipreqs out of the environment itself.
fn ignored_folders_below(
    directory: &ProjectDirectory,
    excluded: &[ExcludedDirectory],
) -> Vec<String> {
    excluded
        .iter()
        .filter(|candidate| candidate.path.starts_with(directory.path()))
        .filter_map(ExcludedDirectory::folder_name)
        .collect()
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().to_string()
}
