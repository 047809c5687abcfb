use reqs_sweep::consolidation::domain::ExcludedDirectory;
use reqs_sweep::prelude::*;
use std::path::{Path, PathBuf};

/// Mock DirectoryWalker yielding a fixed folder list in the given order
///
/// Folder names are still run through the filter so exclusion rules apply
/// exactly as they would during a real traversal.
#[derive(Default)]
pub struct MockDirectoryWalker {
    folders: Vec<String>,
}

impl MockDirectoryWalker {
    pub fn new(folders: &[&str]) -> Self {
        Self {
            folders: folders.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl DirectoryWalker for MockDirectoryWalker {
    fn walk<'a>(
        &'a self,
        root: &'a Path,
        filter: &'a DirectoryFilter,
    ) -> Box<dyn Iterator<Item = WalkEvent> + 'a> {
        Box::new(self.folders.iter().map(move |folder| {
            let relative = PathBuf::from(folder);
            let excluded = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .find_map(|name| filter.exclusion_reason(&name));
            match excluded {
                Some(reason) => WalkEvent::Excluded(ExcludedDirectory::new(root.join(folder), reason)),
                None => WalkEvent::Project(ProjectDirectory::new(root.join(folder), relative, 1)),
            }
        }))
    }
}
