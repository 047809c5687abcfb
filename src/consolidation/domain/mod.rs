pub mod consolidated_requirements;
pub mod package;
pub mod project_directory;
pub mod requirement;
pub mod version;

pub use consolidated_requirements::ConsolidatedRequirements;
pub use package::PackageName;
pub use project_directory::{ExcludedDirectory, ExclusionReason, ProjectDirectory};
pub use requirement::{ConstraintOperator, RequirementEntry, VersionConstraint};
pub use version::Version;
