use crate::consolidation::domain::RequirementEntry;

/// MergePolicy decides which entry survives when two folders require the
/// same package.
///
/// - `HighestVersion` (default): the higher version wins. A versioned entry
///   beats an unversioned one. On a tie the entry seen first is kept.
/// - `LastSeen`: the entry seen last in traversal order wins.
///
/// Traversal order is sorted by folder name, so both policies are
/// deterministic for a given tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    #[default]
    HighestVersion,
    LastSeen,
}

impl MergePolicy {
    /// Returns true when `candidate` should replace `existing`
    pub fn prefers_candidate(&self, existing: &RequirementEntry, candidate: &RequirementEntry) -> bool {
        match self {
            MergePolicy::LastSeen => true,
            MergePolicy::HighestVersion => match (existing.version(), candidate.version()) {
                (None, Some(_)) => true,
                (Some(_), None) | (None, None) => false,
                (Some(current), Some(incoming)) => {
                    !incoming.is_equivalent(current) && incoming > current
                }
            },
        }
    }
}

impl std::str::FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" | "highest-version" | "max" => Ok(MergePolicy::HighestVersion),
            "last" | "last-seen" => Ok(MergePolicy::LastSeen),
            _ => Err(format!(
                "Invalid merge policy: {}. Please specify 'highest' or 'last'",
                s
            )),
        }
    }
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergePolicy::HighestVersion => write!(f, "highest"),
            MergePolicy::LastSeen => write!(f, "last"),
        }
    }
}
