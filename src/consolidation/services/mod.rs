mod consolidator;
mod directory_filter;
mod requirement_parser;

pub use consolidator::{Consolidator, MergeConflict};
pub use directory_filter::{DirectoryFilter, SYSTEM_FOLDERS, VIRTUAL_ENVIRONMENT_FOLDERS};
pub use requirement_parser::{ParsedRequirements, RequirementParser};
