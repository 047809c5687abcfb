use super::requirement::RequirementEntry;
use std::collections::BTreeMap;

/// ConsolidatedRequirements aggregate: at most one entry per package
///
/// Entries are keyed by normalized package name; the `BTreeMap` keeps them
/// sorted, which is the order the artifact is written in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedRequirements {
    entries: BTreeMap<String, RequirementEntry>,
}

impl ConsolidatedRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entry for the package that `entry` would merge into
    pub fn get(&self, key: &str) -> Option<&RequirementEntry> {
        self.entries.get(key)
    }

    /// Stores `entry`, returning the entry it replaced
    pub fn replace(&mut self, entry: RequirementEntry) -> Option<RequirementEntry> {
        self.entries.insert(entry.key(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by normalized package name
    pub fn iter(&self) -> impl Iterator<Item = &RequirementEntry> {
        self.entries.values()
    }

    /// Rendered requirement lines, sorted
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_sorted_by_normalized_name() {
        let mut consolidated = ConsolidatedRequirements::new();
        consolidated.replace(RequirementEntry::pinned("requests", "2.31.0").unwrap());
        consolidated.replace(RequirementEntry::pinned("Flask", "3.0.0").unwrap());
        consolidated.replace(RequirementEntry::pinned("numpy", "1.26.4").unwrap());

        assert_eq!(
            consolidated.lines(),
            vec!["Flask==3.0.0", "numpy==1.26.4", "requests==2.31.0"]
        );
    }

    #[test]
    fn test_replace_returns_previous_entry() {
        let mut consolidated = ConsolidatedRequirements::new();
        assert!(consolidated
            .replace(RequirementEntry::pinned("PyYAML", "6.0").unwrap())
            .is_none());

        let previous = consolidated
            .replace(RequirementEntry::pinned("pyyaml", "6.0.1").unwrap())
            .unwrap();
        assert_eq!(previous.to_string(), "PyYAML==6.0");
        assert_eq!(consolidated.len(), 1);
        assert_eq!(consolidated.get("pyyaml").unwrap().to_string(), "pyyaml==6.0.1");
    }

    #[test]
    fn test_empty() {
        let consolidated = ConsolidatedRequirements::new();
        assert!(consolidated.is_empty());
        assert!(consolidated.lines().is_empty());
    }
}
