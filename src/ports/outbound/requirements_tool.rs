use crate::consolidation::domain::ProjectDirectory;
use crate::shared::Result;
use std::path::PathBuf;

/// RequirementsTool port for the external dependency scanner
///
/// This port abstracts the pipreqs invocation so the use case can be
/// exercised without a Python installation.
pub trait RequirementsTool {
    /// Generates a requirements listing for one folder
    ///
    /// The tool runs in local-only mode: versions come from installed
    /// packages, never from a package index.
    ///
    /// # Returns
    /// Path of the listing the tool wrote
    ///
    /// # Errors
    /// Returns `SweepError::ToolInvocationError` if the tool cannot be
    /// started, exits with a non-zero status, or writes no output.
    fn generate(&self, directory: &ProjectDirectory) -> Result<PathBuf>;
}
