use crate::shared::Result;
use std::cmp::Ordering;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for a package version with validation
///
/// Versions order by a PEP 440 style key: epoch, numeric release segments
/// (trailing zeros ignored), then pre/post/dev markers. Versions whose keys
/// tie are ordered by their raw text so the ordering stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+' | '*' | '!')
        }) {
            anyhow::bail!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens, underscores, plus, exclamation marks and asterisks are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both versions denote the same release (`2.0` and `2.0.0` do)
    pub fn is_equivalent(&self, other: &Version) -> bool {
        VersionKey::parse(&self.0) == VersionKey::parse(&other.0)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        VersionKey::parse(&self.0)
            .cmp(&VersionKey::parse(&other.0))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Release phase, in ascending order of precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Dev,
    Alpha,
    Beta,
    ReleaseCandidate,
    Final,
    Post,
}

/// Field order matters: the derived `Ord` compares top to bottom.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct VersionKey {
    epoch: u64,
    release: Vec<u64>,
    stage: Stage,
    stage_number: u64,
    remainder: String,
}

impl VersionKey {
    fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_ascii_lowercase();
        let text = lowered.strip_prefix('v').unwrap_or(&lowered);

        let (epoch, text) = match text
            .split_once('!')
            .and_then(|(epoch, rest)| epoch.parse::<u64>().ok().map(|e| (e, rest)))
        {
            Some(parsed) => parsed,
            None => (0, text),
        };

        let (public, local) = text.split_once('+').unwrap_or((text, ""));

        let mut release = Vec::new();
        let mut rest = public;
        loop {
            let digits = leading_digits(rest);
            if digits.is_empty() {
                break;
            }
            release.push(digits.parse::<u64>().unwrap_or(u64::MAX));
            rest = &rest[digits.len()..];
            match rest.strip_prefix('.') {
                Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
                _ => break,
            }
        }
        while release.last() == Some(&0) {
            release.pop();
        }

        let implicit_post = rest.starts_with('-');
        let suffix = rest.trim_start_matches(['.', '-', '_']);
        let (stage, after_marker) = split_stage(suffix, implicit_post);
        let after_marker = after_marker.trim_start_matches(['.', '-', '_']);
        let number = leading_digits(after_marker);
        let stage_number = number.parse::<u64>().unwrap_or(0);

        let mut remainder = after_marker[number.len()..].to_string();
        if !local.is_empty() {
            remainder.push('+');
            remainder.push_str(local);
        }

        Self {
            epoch,
            release,
            stage,
            stage_number,
            remainder,
        }
    }
}

fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    &text[..end]
}

/// Splits a recognised phase marker off the front of `suffix`.
///
/// Longer spellings are listed before their prefixes (`preview` before `pre`).
fn split_stage(suffix: &str, implicit_post: bool) -> (Stage, &str) {
    const MARKERS: &[(&str, Stage)] = &[
        ("dev", Stage::Dev),
        ("alpha", Stage::Alpha),
        ("a", Stage::Alpha),
        ("beta", Stage::Beta),
        ("b", Stage::Beta),
        ("preview", Stage::ReleaseCandidate),
        ("pre", Stage::ReleaseCandidate),
        ("rc", Stage::ReleaseCandidate),
        ("c", Stage::ReleaseCandidate),
        ("post", Stage::Post),
        ("rev", Stage::Post),
        ("r", Stage::Post),
    ];

    if suffix.is_empty() {
        return (Stage::Final, suffix);
    }

    for (marker, stage) in MARKERS {
        if let Some(rest) = suffix.strip_prefix(marker) {
            return (*stage, rest);
        }
    }

    // "1.0-1" is an implicit post release
    if implicit_post && suffix.chars().all(|c| c.is_ascii_digit()) {
        return (Stage::Post, suffix);
    }

    (Stage::Final, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        Version::new(text.to_string()).unwrap()
    }

    #[test]
    fn test_version_new_valid() {
        assert_eq!(v("2.31.0").as_str(), "2.31.0");
        assert_eq!(v("1!2.0.post1").as_str(), "1!2.0.post1");
    }

    #[test]
    fn test_version_new_empty() {
        assert!(Version::new("".to_string()).is_err());
    }

    #[test]
    fn test_version_new_invalid_characters() {
        let result = Version::new("1.0; rm -rf".to_string());
        assert!(result.unwrap_err().to_string().contains("invalid characters"));
    }

    #[test]
    fn test_numeric_segments_compare_numerically() {
        assert!(v("1.10") > v("1.9"));
        assert!(v("2.0") > v("1.99.99"));
        assert!(v("10.0.0") > v("9.0.0"));
    }

    #[test]
    fn test_trailing_zeros_are_equivalent() {
        assert!(v("2.0").is_equivalent(&v("2.0.0")));
        assert!(!v("2.0").is_equivalent(&v("2.0.1")));
        // Still totally ordered by raw text
        assert_ne!(v("2.0").cmp(&v("2.0.0")), Ordering::Equal);
    }

    #[test]
    fn test_pre_releases_sort_before_final() {
        assert!(v("1.0a1") < v("1.0b1"));
        assert!(v("1.0b2") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0.dev3") < v("1.0a1"));
    }

    #[test]
    fn test_post_releases_sort_after_final() {
        assert!(v("1.0.post1") > v("1.0"));
        assert!(v("1.0-1") > v("1.0"));
        assert!(v("1.0.post2") > v("1.0.post1"));
        assert!(v("1.0.post1") < v("1.0.1"));
    }

    #[test]
    fn test_epoch_wins_over_release() {
        assert!(v("1!0.1") > v("2024.1"));
    }

    #[test]
    fn test_leading_v_is_ignored() {
        assert!(v("v1.2").is_equivalent(&v("1.2")));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(format!("{}", v("1.0.0")), "1.0.0");
    }
}
