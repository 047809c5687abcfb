use crate::application::dto::ScanResponse;
use crate::ports::outbound::RequirementsFormatter;
use crate::shared::Result;

/// TextRequirementsFormatter adapter producing a pip-installable file
///
/// One `name` or `name<op>version` per line, sorted by normalized name,
/// LF-terminated. An empty result renders as an empty string.
pub struct TextRequirementsFormatter;

impl TextRequirementsFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextRequirementsFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementsFormatter for TextRequirementsFormatter {
    fn format(&self, response: &ScanResponse) -> Result<String> {
        let mut output = String::new();
        for line in response.requirements.lines() {
            output.push_str(&line);
            output.push('\n');
        }
        Ok(output)
    }
}
