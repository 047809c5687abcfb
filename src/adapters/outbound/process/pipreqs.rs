use crate::consolidation::domain::ProjectDirectory;
use crate::ports::outbound::RequirementsTool;
use crate::shared::error::SweepError;
use crate::shared::Result;
use std::cell::Cell;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

#[cfg(windows)]
const PIPREQS_EXECUTABLE: &str = "pipreqs.exe";
#[cfg(not(windows))]
const PIPREQS_EXECUTABLE: &str = "pipreqs";

#[cfg(windows)]
const VENV_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const VENV_BIN_DIR: &str = "bin";

/// pipreqs `--mode`: how versions are pinned in its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// `~=`
    Compat,
    /// `>=`
    Gt,
    /// bare package names
    NoPin,
}

impl PinMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinMode::Compat => "compat",
            PinMode::Gt => "gt",
            PinMode::NoPin => "no-pin",
        }
    }
}

impl std::str::FromStr for PinMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compat" => Ok(PinMode::Compat),
            "gt" => Ok(PinMode::Gt),
            "no-pin" | "nopin" => Ok(PinMode::NoPin),
            _ => Err(format!(
                "Invalid pin mode: {}. Please specify 'compat', 'gt' or 'no-pin'",
                s
            )),
        }
    }
}

impl std::fmt::Display for PinMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PipreqsTool adapter running pipreqs once per folder
///
/// Listings are saved into a scratch directory owned by the adapter and
/// removed when it is dropped, so scanned projects are left untouched.
pub struct PipreqsTool {
    executable: PathBuf,
    pin_mode: Option<PinMode>,
    scratch: TempDir,
    runs: Cell<usize>,
}

impl PipreqsTool {
    /// Creates the adapter
    ///
    /// # Arguments
    /// * `executable` - Explicit pipreqs path; located automatically when `None`
    /// * `pin_mode` - Forwarded as `--mode` when set
    ///
    /// # Errors
    /// Returns an error if the scratch directory cannot be created
    pub fn new(executable: Option<PathBuf>, pin_mode: Option<PinMode>) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("reqs-sweep-")
            .tempdir()
            .map_err(|e| anyhow::anyhow!("Failed to create scratch directory: {}", e))?;
        let executable = executable.unwrap_or_else(locate_executable);
        tracing::debug!(executable = %executable.display(), "using pipreqs");

        Ok(Self {
            executable,
            pin_mode,
            scratch,
            runs: Cell::new(0),
        })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn next_savepath(&self) -> PathBuf {
        let run = self.runs.get() + 1;
        self.runs.set(run);
        self.scratch.path().join(format!("{}.txt", run))
    }

    fn build_command(&self, directory: &ProjectDirectory, savepath: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg(directory.path())
            .arg("--savepath")
            .arg(savepath)
            .args(["--force", "--encoding", "utf-8", "--use-local"]);

        if let Some(mode) = self.pin_mode {
            command.args(["--mode", mode.as_str()]);
        }
        if !directory.ignored_folders().is_empty() {
            command.arg("--ignore").arg(directory.ignored_folders().join(","));
        }
        command
    }

    fn invocation_error(directory: &ProjectDirectory, details: String) -> anyhow::Error {
        SweepError::ToolInvocationError {
            path: directory.path().to_path_buf(),
            details,
        }
        .into()
    }
}

impl RequirementsTool for PipreqsTool {
    fn generate(&self, directory: &ProjectDirectory) -> Result<PathBuf> {
        let savepath = self.next_savepath();
        let mut command = self.build_command(directory, &savepath);
        tracing::debug!(command = ?command, "running pipreqs");

        let output = command.output().map_err(|e| {
            Self::invocation_error(
                directory,
                format!("could not start {}: {}", self.executable.display(), e),
            )
        })?;

        if !output.status.success() {
            return Err(Self::invocation_error(directory, failure_details(&output)));
        }
        if !savepath.is_file() {
            return Err(Self::invocation_error(
                directory,
                "pipreqs exited successfully but wrote no requirements file".to_string(),
            ));
        }

        Ok(savepath)
    }
}

/// pipreqs in the active virtual environment, else whatever `PATH` resolves
fn locate_executable() -> PathBuf {
    env::var_os("VIRTUAL_ENV")
        .map(|venv| PathBuf::from(venv).join(VENV_BIN_DIR).join(PIPREQS_EXECUTABLE))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(PIPREQS_EXECUTABLE))
}

fn failure_details(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    match stderr.lines().rev().map(str::trim).find(|line| !line.is_empty()) {
        Some(last_line) => format!("{} ({})", output.status, last_line),
        None => output.status.to_string(),
    }
}
