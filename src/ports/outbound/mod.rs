/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, subprocesses, console).
pub mod directory_walker;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod requirements_file_reader;
pub mod requirements_tool;

pub use directory_walker::{DirectoryWalker, WalkEvent};
pub use formatter::RequirementsFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use requirements_file_reader::{DecodedRequirements, RequirementsFileReader};
pub use requirements_tool::RequirementsTool;
