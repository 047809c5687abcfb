use crate::shared::Result;
use std::path::Path;

/// Text of a requirements listing after encoding normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRequirements {
    /// UTF-8 text with LF line endings and no BOM
    pub content: String,
    /// Name of the encoding the bytes were decoded from
    pub encoding: &'static str,
}

impl DecodedRequirements {
    /// Whether the primary encoding failed and the fallback was used
    pub fn used_fallback(&self) -> bool {
        self.encoding != "UTF-8"
    }
}

/// RequirementsFileReader port for loading per-folder tool output
pub trait RequirementsFileReader {
    /// Reads a listing, decoding it as UTF-8 with a documented fallback
    ///
    /// # Errors
    /// Returns `SweepError::EncodingError` if the file cannot be read
    fn read_requirements(&self, path: &Path) -> Result<DecodedRequirements>;
}
