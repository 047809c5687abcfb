use crate::ports::outbound::{DecodedRequirements, RequirementsFileReader};
use crate::shared::error::SweepError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Decodes raw listing bytes into LF-terminated UTF-8 text
///
/// UTF-8 is tried first (a byte order mark is honoured and dropped). If the
/// bytes are not valid UTF-8 they are decoded as Windows-1252, which maps
/// every byte, so decoding itself never fails.
pub fn normalize_bytes(bytes: &[u8]) -> DecodedRequirements {
    let (content, encoding, had_errors) = encoding_rs::UTF_8.decode(bytes);
    let (content, encoding) = if had_errors {
        let (content, encoding, _) = encoding_rs::WINDOWS_1252.decode(bytes);
        (content, encoding)
    } else {
        (content, encoding)
    };

    DecodedRequirements {
        content: normalize_line_endings(content.trim_start_matches('\u{feff}')),
        encoding: encoding.name(),
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// EncodingNormalizingReader adapter for loading pipreqs output
///
/// Applies the same guards as the rest of the file I/O: no symlinks, regular
/// files only, bounded size.
pub struct EncodingNormalizingReader;

impl EncodingNormalizingReader {
    pub fn new() -> Self {
        Self
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        validate_regular_file(path, "requirements output")?;
        let metadata = fs::metadata(path)?;
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;
        Ok(fs::read(path)?)
    }
}

impl Default for EncodingNormalizingReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementsFileReader for EncodingNormalizingReader {
    fn read_requirements(&self, path: &Path) -> Result<DecodedRequirements> {
        let bytes = self.read_bytes(path).map_err(|e| SweepError::EncodingError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let decoded = normalize_bytes(&bytes);
        tracing::debug!(
            path = %path.display(),
            encoding = decoded.encoding,
            bytes = bytes.len(),
            "decoded requirements output"
        );
        Ok(decoded)
    }
}
