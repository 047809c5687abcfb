/// ProgressReporter port for user-facing run feedback
///
/// Every recoverable problem (unreadable subtree, failed pipreqs run,
/// undecodable output, malformed line) reaches the user through
/// `report_warning`; nothing is printed by the domain itself.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports per-folder progress
    ///
    /// # Arguments
    /// * `current` - Folders finished so far
    /// * `total` - Folders to scan
    /// * `message` - Optional label of the folder being scanned
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a recovered problem; the run continues
    fn report_warning(&self, message: &str);

    /// Reports completion of the run
    fn report_completion(&self, message: &str);
}
