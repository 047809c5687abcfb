/// Data Transfer Objects for application layer
///
/// DTOs carry data between the adapters and the use case, keeping the
/// consolidation domain free of CLI and formatting concerns.
mod output_format;
mod scan_request;
mod scan_response;

pub use output_format::OutputFormat;
pub use scan_request::ScanRequest;
pub use scan_response::{FailedDirectory, ScanResponse, ScannedDirectory};
