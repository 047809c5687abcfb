/// Mock implementations for testing
mod mock_directory_walker;
mod mock_progress_reporter;
mod mock_requirements_tool;

pub use mock_directory_walker::MockDirectoryWalker;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_requirements_tool::MockRequirementsTool;
