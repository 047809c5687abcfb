//! reqs-sweep - consolidate pipreqs output across a repository
//!
//! Walks a folder tree, runs pipreqs in local-only mode on every folder that
//! holds Python sources (skipping virtual environments and tooling folders),
//! normalizes each listing's encoding and merges everything into a single
//! sorted, de-duplicated `requirements.txt`.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`consolidation`): requirement entries, versions, the
//!   merge policy, directory filtering and the consolidator
//! - **Application Layer** (`application`): the consolidation use case and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): walkdir traversal, pipreqs subprocess, file I/O,
//!   formatters and console output
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use reqs_sweep::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case = ConsolidateRequirementsUseCase::new(
//!     WalkdirDirectoryWalker::new(),
//!     PipreqsTool::new(None, None)?,
//!     EncodingNormalizingReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = ScanRequest::new(PathBuf::from(".")).add_exclude_pattern("build");
//! let response = use_case.execute(request)?;
//!
//! let output = TextRequirementsFormatter::new().format(&response)?;
//! print!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod consolidation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        EncodingNormalizingReader, FileSystemWriter, StdoutPresenter, WalkdirDirectoryWalker,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonReportFormatter, TextRequirementsFormatter,
    };
    pub use crate::adapters::outbound::process::{PinMode, PipreqsTool};
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::ConsolidateRequirementsUseCase;
    pub use crate::consolidation::domain::{
        ConsolidatedRequirements, PackageName, ProjectDirectory, RequirementEntry, Version,
    };
    pub use crate::consolidation::policies::MergePolicy;
    pub use crate::consolidation::services::{Consolidator, DirectoryFilter, RequirementParser};
    pub use crate::ports::outbound::{
        DirectoryWalker, OutputPresenter, ProgressReporter, RequirementsFileReader,
        RequirementsFormatter, RequirementsTool, WalkEvent,
    };
    pub use crate::shared::Result;
}
