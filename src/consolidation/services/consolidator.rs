use crate::consolidation::domain::{ConsolidatedRequirements, RequirementEntry};
use crate::consolidation::policies::MergePolicy;

/// Record of two folders disagreeing about the same package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub kept: RequirementEntry,
    pub discarded: RequirementEntry,
}

impl std::fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (from {}) chosen over {} (from {})",
            self.kept,
            source_label(&self.kept),
            self.discarded,
            source_label(&self.discarded)
        )
    }
}

fn source_label(entry: &RequirementEntry) -> &str {
    if entry.source().is_empty() {
        "."
    } else {
        entry.source()
    }
}

/// Consolidator - merges per-folder listings into one de-duplicated set
///
/// Entries that differ only in name spelling (`Flask` / `flask`) are not
/// conflicts; only differing constraints are recorded.
#[derive(Debug, Default)]
pub struct Consolidator {
    policy: MergePolicy,
    requirements: ConsolidatedRequirements,
    conflicts: Vec<MergeConflict>,
}

impl Consolidator {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            requirements: ConsolidatedRequirements::new(),
            conflicts: Vec::new(),
        }
    }

    /// Merges entries in the order given
    pub fn add_all(&mut self, entries: impl IntoIterator<Item = RequirementEntry>) {
        for entry in entries {
            self.add(entry);
        }
    }

    pub fn add(&mut self, candidate: RequirementEntry) {
        let Some(existing) = self.requirements.get(&candidate.key()) else {
            self.requirements.replace(candidate);
            return;
        };

        let differs = existing.constraint() != candidate.constraint();
        if self.policy.prefers_candidate(existing, &candidate) {
            if let Some(discarded) = self.requirements.replace(candidate.clone()) {
                if differs {
                    self.conflicts.push(MergeConflict {
                        kept: candidate,
                        discarded,
                    });
                }
            }
        } else if differs {
            self.conflicts.push(MergeConflict {
                kept: existing.clone(),
                discarded: candidate,
            });
        }
    }

    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    pub fn finish(self) -> (ConsolidatedRequirements, Vec<MergeConflict>) {
        (self.requirements, self.conflicts)
    }
}
