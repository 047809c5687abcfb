use crate::consolidation::domain::ExclusionReason;
use crate::shared::error::SweepError;
use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of exclude patterns to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// Folder names that hold virtual environments
pub const VIRTUAL_ENVIRONMENT_FOLDERS: &[&str] = &["venv", ".venv", "env", "myenv"];

/// Interpreter and packaging folders that never hold project code
///
/// `Lib` and `Scripts` are the Windows interpreter layout and match exactly,
/// so ordinary `lib/` and `scripts/` project folders are still scanned.
pub const SYSTEM_FOLDERS: &[&str] = &["__pycache__", "site-packages", "Lib", "Scripts"];

/// DirectoryFilter - decides which folders are pruned from the traversal
///
/// Built-in rules cover virtual environment names, interpreter folders and
/// hidden folders. User patterns support `*` wildcards. Virtual environment
/// names and user patterns match case-insensitively; system folder names
/// match exactly.
#[derive(Debug)]
pub struct DirectoryFilter {
    patterns: Vec<ExcludePattern>,
}

impl DirectoryFilter {
    /// Creates a filter from the built-in rules plus user supplied patterns
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcard-only)
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            return Err(SweepError::Validation {
                message: format!(
                    "Too many exclusion patterns: {} (maximum: {})",
                    patterns.len(),
                    MAX_EXCLUDE_PATTERNS
                ),
            }
            .into());
        }

        let mut compiled_patterns = Vec::new();
        for pattern in patterns {
            compiled_patterns.push(ExcludePattern::new(pattern)?);
        }

        Ok(Self {
            patterns: compiled_patterns,
        })
    }

    /// Returns why a folder called `folder_name` must be skipped, if it must
    pub fn exclusion_reason(&self, folder_name: &str) -> Option<ExclusionReason> {
        let lowered = folder_name.to_lowercase();

        if VIRTUAL_ENVIRONMENT_FOLDERS
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&lowered))
        {
            return Some(ExclusionReason::VirtualEnvironment);
        }

        if SYSTEM_FOLDERS.contains(&folder_name) {
            return Some(ExclusionReason::System);
        }

        if lowered.starts_with('.') {
            return Some(ExclusionReason::Hidden);
        }

        self.patterns
            .iter()
            .find(|pattern| pattern.matches(&lowered))
            .map(|pattern| ExclusionReason::Pattern(pattern.original.clone()))
    }

    /// Returns the user patterns that have not excluded any folder so far
    ///
    /// Call this after the traversal has finished.
    pub fn get_unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

/// Represents a single exclusion pattern with its compiled matcher
#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;

        let matcher = compile_pattern(&pattern.to_lowercase());

        Ok(Self {
            original: pattern,
            matcher,
            matched: Cell::new(false),
        })
    }

    /// `folder_name` must already be lowercased
    fn matches(&self, folder_name: &str) -> bool {
        let is_match = self.matcher.matches(folder_name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

/// Pattern matcher types for efficient matching
#[derive(Debug)]
enum PatternMatcher {
    /// Exact match: "build"
    Exact(String),
    /// Leading wildcard: "*_env"
    EndsWith(String),
    /// Trailing wildcard: "build-*"
    StartsWith(String),
    /// Wildcards on both ends: "*tmp*"
    Contains(String),
    /// Anything else: "pre*fix*suf"
    Multiple(Vec<String>),
}

impl PatternMatcher {
    fn matches(&self, folder_name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => folder_name == s,
            PatternMatcher::EndsWith(suffix) => folder_name.ends_with(suffix.as_str()),
            PatternMatcher::StartsWith(prefix) => folder_name.starts_with(prefix.as_str()),
            PatternMatcher::Contains(middle) => folder_name.contains(middle.as_str()),
            PatternMatcher::Multiple(parts) => {
                // Anchored at both ends unless the pattern starts/ends with '*'
                let mut remaining = folder_name;
                for (index, part) in parts.iter().enumerate() {
                    if part.is_empty() {
                        continue;
                    }
                    if index == 0 {
                        match remaining.strip_prefix(part.as_str()) {
                            Some(rest) => remaining = rest,
                            None => return false,
                        }
                    } else if index == parts.len() - 1 {
                        return remaining.ends_with(part.as_str());
                    } else {
                        match remaining.find(part.as_str()) {
                            Some(pos) => remaining = &remaining[pos + part.len()..],
                            None => return false,
                        }
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        return Err(validation_error("Exclusion pattern cannot be empty".to_string()));
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(validation_error(format!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        )));
    }

    for ch in pattern.chars() {
        if !is_valid_pattern_char(ch) {
            return Err(validation_error(format!(
                "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
                 Patterns match a single folder name: letters, digits, spaces, '-', '_', '.', '+', '@' and '*' are allowed.",
                ch, pattern
            )));
        }
    }

    if pattern.chars().all(|c| c == '*') {
        return Err(validation_error(format!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        )));
    }

    Ok(())
}

fn validation_error(message: String) -> anyhow::Error {
    SweepError::Validation { message }.into()
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '@' | ' ' | '*')
}

/// Compiles a lowercased pattern string into a matcher
fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();
    let starts = pattern.starts_with('*');
    let ends = pattern.ends_with('*');

    match wildcard_count {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 if starts => PatternMatcher::EndsWith(pattern[1..].to_string()),
        1 if ends => PatternMatcher::StartsWith(pattern[..pattern.len() - 1].to_string()),
        2 if starts && ends => PatternMatcher::Contains(pattern[1..pattern.len() - 1].to_string()),
        // Empty leading/trailing parts mark unanchored ends
        _ => PatternMatcher::Multiple(pattern.split('*').map(str::to_string).collect()),
    }
}
