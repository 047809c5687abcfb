use crate::application::dto::ScanResponse;
use crate::shared::Result;

/// RequirementsFormatter port for rendering the consolidated result
///
/// This port abstracts the formatting logic for the different output
/// formats (plain requirements file, JSON report).
pub trait RequirementsFormatter {
    /// Renders the scan result
    ///
    /// Output must be deterministic: formatting the same response twice
    /// yields byte-identical text.
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &ScanResponse) -> Result<String>;
}
