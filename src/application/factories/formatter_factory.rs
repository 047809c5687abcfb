use crate::adapters::outbound::formatters::{JsonReportFormatter, TextRequirementsFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::RequirementsFormatter;

/// Factory for creating requirements formatters
///
/// Selects the infrastructure adapter matching the requested output format.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use reqs_sweep::application::dto::{OutputFormat, ScanResponse};
    /// use reqs_sweep::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Text);
    /// assert_eq!(formatter.format(&ScanResponse::default()).unwrap(), "");
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn RequirementsFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextRequirementsFormatter::new()),
            OutputFormat::Json => Box::new(JsonReportFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use reqs_sweep::application::dto::OutputFormat;
    /// use reqs_sweep::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON report...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Writing consolidated requirements...",
            OutputFormat::Json => "📝 Generating JSON report...",
        }
    }

    /// Warning shown when no package was detected anywhere
    pub fn empty_result_warning(format: OutputFormat, destination: &str) -> String {
        match format {
            OutputFormat::Text => format!(
                "⚠️  Warning: No requirements were detected; {} is empty.",
                destination
            ),
            OutputFormat::Json => format!(
                "⚠️  Warning: No requirements were detected; the report in {} lists no packages.",
                destination
            ),
        }
    }
}
