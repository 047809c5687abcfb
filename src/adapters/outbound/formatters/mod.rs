/// Formatter adapters for the consolidated output
mod json_formatter;
mod text_formatter;

pub use json_formatter::JsonReportFormatter;
pub use text_formatter::TextRequirementsFormatter;
