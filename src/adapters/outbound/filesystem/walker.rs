use crate::consolidation::domain::{ExcludedDirectory, ExclusionReason, ProjectDirectory};
use crate::consolidation::services::DirectoryFilter;
use crate::ports::outbound::{DirectoryWalker, WalkEvent};
use crate::shared::error::SweepError;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Marker file every `python -m venv` environment carries at its top level
const PYVENV_MARKER: &str = "pyvenv.cfg";

/// WalkdirDirectoryWalker adapter for enumerating project folders
///
/// Depth-first, sorted by file name, never following symbolic links.
/// Excluded folders are pruned together with everything beneath them.
pub struct WalkdirDirectoryWalker;

impl WalkdirDirectoryWalker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WalkdirDirectoryWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryWalker for WalkdirDirectoryWalker {
    fn walk<'a>(
        &'a self,
        root: &'a Path,
        filter: &'a DirectoryFilter,
    ) -> Box<dyn Iterator<Item = WalkEvent> + 'a> {
        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| is_walkable(entry, filter));

        Box::new(entries.flat_map(move |entry| match entry {
            Ok(entry) => inspect_directory(root, entry.path(), filter),
            Err(error) => vec![WalkEvent::Error(traversal_error(root, &error))],
        }))
    }
}

/// Only directories are visited; below the root they must also survive the filter
fn is_walkable(entry: &DirEntry, filter: &DirectoryFilter) -> bool {
    entry.file_type().is_dir()
        && (entry.depth() == 0 || exclusion_reason(entry.path(), filter).is_none())
}

fn exclusion_reason(path: &Path, filter: &DirectoryFilter) -> Option<ExclusionReason> {
    let name = path.file_name()?.to_string_lossy();
    filter.exclusion_reason(&name).or_else(|| {
        path.join(PYVENV_MARKER)
            .is_file()
            .then_some(ExclusionReason::VirtualEnvironment)
    })
}

/// Counts Python sources in one folder and reports its excluded children
fn inspect_directory(root: &Path, path: &Path, filter: &DirectoryFilter) -> Vec<WalkEvent> {
    let children = match fs::read_dir(path) {
        Ok(children) => children,
        Err(e) => {
            // walkdir reports the same failure when it descends
            tracing::debug!(path = %path.display(), error = %e, "cannot list folder");
            return Vec::new();
        }
    };

    let mut source_file_count = 0;
    let mut excluded = Vec::new();
    for child in children.flatten() {
        let Ok(file_type) = child.file_type() else {
            continue;
        };
        let child_path = child.path();
        if file_type.is_file() && is_python_source(&child_path) {
            source_file_count += 1;
        } else if file_type.is_dir() {
            if let Some(reason) = exclusion_reason(&child_path, filter) {
                excluded.push(ExcludedDirectory::new(child_path, reason));
            }
        }
    }
    excluded.sort_by(|a, b| a.path.cmp(&b.path));

    let mut events = Vec::with_capacity(excluded.len() + 1);
    if source_file_count > 0 {
        let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        events.push(WalkEvent::Project(ProjectDirectory::new(
            path.to_path_buf(),
            relative_path,
            source_file_count,
        )));
    }
    events.extend(excluded.into_iter().map(WalkEvent::Excluded));
    events
}

fn is_python_source(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("py"))
            .unwrap_or(false)
}

fn traversal_error(root: &Path, error: &walkdir::Error) -> SweepError {
    let details = error
        .io_error()
        .map(|e| e.to_string())
        .unwrap_or_else(|| error.to_string());
    SweepError::TraversalError {
        path: error.path().unwrap_or(root).to_path_buf(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "import requests\n").unwrap();
    }

    fn walk(root: &Path, patterns: Vec<&str>) -> (Vec<String>, Vec<ExcludedDirectory>) {
        let filter = DirectoryFilter::new(patterns.into_iter().map(String::from).collect()).unwrap();
        let walker = WalkdirDirectoryWalker::new();
        let mut projects = Vec::new();
        let mut excluded = Vec::new();
        for event in walker.walk(root, &filter) {
            match event {
                WalkEvent::Project(directory) => projects.push(directory.label()),
                WalkEvent::Excluded(directory) => excluded.push(directory),
                WalkEvent::Error(error) => panic!("unexpected traversal error: {}", error),
            }
        }
        (projects, excluded)
    }

    #[test]
    fn test_projects_are_found_in_sorted_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "projB/main.py");
        touch(temp_dir.path(), "projA/app.py");
        touch(temp_dir.path(), "projA/lib2/util.py");

        let (projects, _) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec!["projA", "projA/lib2", "projB"]);
    }

    #[test]
    fn test_root_with_sources_is_a_project() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "setup.py");
        touch(temp_dir.path(), "pkg/mod.py");

        let (projects, _) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec![".", "pkg"]);
    }

    #[test]
    fn test_folders_without_python_are_not_projects() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("docs")).unwrap();
        fs::write(temp_dir.path().join("docs/readme.md"), "# docs").unwrap();
        fs::write(temp_dir.path().join("docs/.hidden.py"), "").unwrap();
        touch(temp_dir.path(), "docs/api/SERVER.PY");

        let (projects, _) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec!["docs/api"]);
    }

    #[test]
    fn test_virtual_environments_are_pruned() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "projA/app.py");
        touch(temp_dir.path(), "projA/venv/lib/site.py");
        touch(temp_dir.path(), ".venv/bin/activate.py");
        touch(temp_dir.path(), "projB/__pycache__/cached.py");

        let (projects, excluded) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec!["projA"]);
        let names: Vec<String> = excluded.iter().filter_map(ExcludedDirectory::folder_name).collect();
        assert!(names.contains(&"venv".to_string()));
        assert!(names.contains(&".venv".to_string()));
        assert!(names.contains(&"__pycache__".to_string()));
    }

    #[test]
    fn test_pyvenv_marker_prunes_custom_named_environment() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "projA/app.py");
        touch(temp_dir.path(), "projA/py311/lib/thing.py");
        fs::write(temp_dir.path().join("projA/py311/pyvenv.cfg"), "home = /usr/bin\n").unwrap();

        let (projects, excluded) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec!["projA"]);
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].reason, ExclusionReason::VirtualEnvironment);
    }

    #[test]
    fn test_lowercase_lib_and_scripts_are_scanned() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "scripts/hello.py");
        touch(temp_dir.path(), "mypkg/core.py");
        touch(temp_dir.path(), "mypkg/lib/util.py");
        touch(temp_dir.path(), "win/Lib/os.py");
        touch(temp_dir.path(), "win/Scripts/activate_this.py");

        let (projects, excluded) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec!["mypkg", "mypkg/lib", "scripts"]);
        let names: Vec<String> = excluded.iter().filter_map(ExcludedDirectory::folder_name).collect();
        assert_eq!(names, vec!["Lib", "Scripts"]);
    }

    #[test]
    fn test_user_patterns_prune_subtrees() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "projA/app.py");
        touch(temp_dir.path(), "build-cache/gen.py");
        touch(temp_dir.path(), "build-cache/nested/more.py");

        let (projects, excluded) = walk(temp_dir.path(), vec!["build-*"]);

        assert_eq!(projects, vec!["projA"]);
        assert_eq!(excluded.len(), 1);
        assert!(matches!(excluded[0].reason, ExclusionReason::Pattern(_)));
    }

    #[test]
    fn test_root_is_never_excluded_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("venv");
        touch(&root, "main.py");

        let (projects, _) = walk(&root, vec![]);

        assert_eq!(projects, vec!["."]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folders_are_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        touch(outside.path(), "lib.py");
        touch(temp_dir.path(), "projA/app.py");
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("linked")).unwrap();

        let (projects, _) = walk(temp_dir.path(), vec![]);

        assert_eq!(projects, vec!["projA"]);
    }

    #[test]
    fn test_source_file_count() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "projA/a.py");
        touch(temp_dir.path(), "projA/b.py");
        fs::write(temp_dir.path().join("projA/notes.txt"), "").unwrap();

        let filter = DirectoryFilter::new(vec![]).unwrap();
        let walker = WalkdirDirectoryWalker::new();
        let counts: Vec<usize> = walker
            .walk(temp_dir.path(), &filter)
            .filter_map(|event| match event {
                WalkEvent::Project(directory) => Some(directory.source_file_count()),
                _ => None,
            })
            .collect();

        assert_eq!(counts, vec![2]);
    }

    #[test]
    fn test_missing_root_yields_error_event() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("absent");
        let filter = DirectoryFilter::new(vec![]).unwrap();

        let events: Vec<WalkEvent> = WalkdirDirectoryWalker::new().walk(&missing, &filter).collect();

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            WalkEvent::Error(SweepError::TraversalError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_reported_and_siblings_are_kept() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "locked/inner/app.py");
        touch(temp_dir.path(), "open/main.py");
        let locked = temp_dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let filter = DirectoryFilter::new(vec![]).unwrap();
        let events: Vec<WalkEvent> = WalkdirDirectoryWalker::new()
            .walk(temp_dir.path(), &filter)
            .collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let projects: Vec<String> = events
            .iter()
            .filter_map(|event| match event {
                WalkEvent::Project(directory) => Some(directory.label()),
                _ => None,
            })
            .collect();
        assert_eq!(projects, vec!["open"]);
        assert!(events.iter().any(|event| matches!(
            event,
            WalkEvent::Error(SweepError::TraversalError { path, .. }) if path.ends_with("locked")
        )));
    }
}
