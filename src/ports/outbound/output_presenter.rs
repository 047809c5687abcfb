use crate::shared::Result;

/// OutputPresenter port for delivering the final artifact
///
/// Abstracts the destination (requirements file or stdout).
pub trait OutputPresenter {
    /// Writes the rendered artifact to the destination
    ///
    /// # Errors
    /// Returns an error if writing fails (missing parent directory,
    /// permissions, symlinked target)
    fn present(&self, content: &str) -> Result<()>;

    /// Short description of the destination for progress messages
    fn destination(&self) -> String;
}
