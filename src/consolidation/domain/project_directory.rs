use std::path::{Path, PathBuf};

/// Why a folder was left out of the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Named like a virtual environment (`venv`, `.venv`, ...) or holds a `pyvenv.cfg`
    VirtualEnvironment,
    /// Folder name starts with a dot
    Hidden,
    /// Interpreter or tooling folder (`__pycache__`, `site-packages`, ...)
    System,
    /// Matched a user supplied exclude pattern
    Pattern(String),
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::VirtualEnvironment => write!(f, "virtual environment"),
            ExclusionReason::Hidden => write!(f, "hidden folder"),
            ExclusionReason::System => write!(f, "system folder"),
            ExclusionReason::Pattern(pattern) => write!(f, "matches pattern '{}'", pattern),
        }
    }
}

/// A folder that was pruned from the traversal together with its subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedDirectory {
    pub path: PathBuf,
    pub reason: ExclusionReason,
}

impl ExcludedDirectory {
    pub fn new(path: PathBuf, reason: ExclusionReason) -> Self {
        Self { path, reason }
    }

    /// Final path component, as handed to pipreqs' `--ignore`
    pub fn folder_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}

/// ProjectDirectory entity: a folder holding at least one Python source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDirectory {
    path: PathBuf,
    relative_path: PathBuf,
    source_file_count: usize,
    ignored_folders: Vec<String>,
}

impl ProjectDirectory {
    pub fn new(path: PathBuf, relative_path: PathBuf, source_file_count: usize) -> Self {
        Self {
            path,
            relative_path,
            source_file_count,
            ignored_folders: Vec::new(),
        }
    }

    /// Records excluded folder names below this directory so the scanning
    /// tool does not descend into them either.
    pub fn with_ignored_folders(mut self, mut folders: Vec<String>) -> Self {
        folders.sort();
        folders.dedup();
        self.ignored_folders = folders;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Human readable label; the scan root itself shows as `.`
    pub fn label(&self) -> String {
        if self.relative_path.as_os_str().is_empty() {
            ".".to_string()
        } else {
            self.relative_path.display().to_string()
        }
    }

    pub fn source_file_count(&self) -> usize {
        self.source_file_count
    }

    pub fn ignored_folders(&self) -> &[String] {
        &self.ignored_folders
    }
}
