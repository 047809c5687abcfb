use crate::consolidation::domain::{ExcludedDirectory, ProjectDirectory};
use crate::consolidation::services::DirectoryFilter;
use crate::shared::error::SweepError;
use std::path::Path;

/// One observation made while walking the tree
#[derive(Debug)]
pub enum WalkEvent {
    /// A folder containing at least one Python source file
    Project(ProjectDirectory),
    /// A folder pruned together with its subtree
    Excluded(ExcludedDirectory),
    /// A subtree that could not be read; traversal continues without it
    Error(SweepError),
}

/// DirectoryWalker port for enumerating candidate project folders
///
/// Implementations are read-only and lazy: events are produced as the
/// traversal advances, in a deterministic order.
pub trait DirectoryWalker {
    /// Walks `root`, pruning every folder `filter` excludes
    ///
    /// The root itself is never excluded by name.
    fn walk<'a>(
        &'a self,
        root: &'a Path,
        filter: &'a DirectoryFilter,
    ) -> Box<dyn Iterator<Item = WalkEvent> + 'a>;
}
