use reqs_sweep::prelude::*;
use reqs_sweep::shared::error::SweepError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Mock RequirementsTool writing canned listings into a scratch directory
///
/// Listings are raw bytes so tests can feed the real encoding normalizer
/// CRLF endings, byte order marks or Windows-1252 text.
pub struct MockRequirementsTool {
    listings: HashMap<String, Vec<u8>>,
    failures: Vec<String>,
    scratch: TempDir,
    runs: Cell<usize>,
    invocations: Rc<RefCell<Vec<String>>>,
}

impl MockRequirementsTool {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
            failures: Vec::new(),
            scratch: TempDir::new().unwrap(),
            runs: Cell::new(0),
            invocations: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_listing(mut self, label: &str, content: impl AsRef<[u8]>) -> Self {
        self.listings
            .insert(label.to_string(), content.as_ref().to_vec());
        self
    }

    pub fn with_failure(mut self, label: &str) -> Self {
        self.failures.push(label.to_string());
        self
    }

    /// Shared handle on the labels the tool was run for; stays readable
    /// after the mock is moved into a use case
    pub fn invocation_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.invocations)
    }
}

impl RequirementsTool for MockRequirementsTool {
    fn generate(&self, directory: &ProjectDirectory) -> Result<PathBuf> {
        let label = directory.label();
        self.invocations.borrow_mut().push(label.clone());

        let listing = match self.listings.get(&label) {
            Some(listing) if !self.failures.contains(&label) => listing,
            _ => {
                return Err(SweepError::ToolInvocationError {
                    path: directory.path().to_path_buf(),
                    details: "exit status: 1 (ModuleNotFoundError: No module named 'yarg')"
                        .to_string(),
                }
                .into())
            }
        };

        let run = self.runs.get() + 1;
        self.runs.set(run);
        let savepath = self.scratch.path().join(format!("{}.txt", run));
        std::fs::write(&savepath, listing)?;
        Ok(savepath)
    }
}
