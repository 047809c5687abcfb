use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// NewType wrapper for package name with validation
///
/// Equality is on the spelling as written; use [`PackageName::normalized`]
/// to compare names the way pip does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only ASCII letters, digits, hyphens, underscores and dots are allowed.",
                name
            );
        }

        let starts_ok = name.starts_with(|c: char| c.is_ascii_alphanumeric());
        let ends_ok = name.ends_with(|c: char| c.is_ascii_alphanumeric());
        if !starts_ok || !ends_ok {
            anyhow::bail!(
                "Package name '{}' must start and end with a letter or digit",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// PEP 503 normalized form: lowercase, runs of `-`, `_` and `.` become one `-`
    pub fn normalized(&self) -> String {
        let mut normalized = String::with_capacity(self.0.len());
        let mut previous_was_separator = false;
        for c in self.0.chars() {
            if matches!(c, '-' | '_' | '.') {
                if !previous_was_separator {
                    normalized.push('-');
                }
                previous_was_separator = true;
            } else {
                normalized.push(c.to_ascii_lowercase());
                previous_was_separator = false;
            }
        }
        normalized
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_new_valid() {
        let name = PackageName::new("requests".to_string()).unwrap();
        assert_eq!(name.as_str(), "requests");
    }

    #[test]
    fn test_package_name_new_empty() {
        assert!(PackageName::new("".to_string()).is_err());
    }

    #[test]
    fn test_package_name_rejects_invalid_characters() {
        let result = PackageName::new("requests;rm".to_string());
        assert!(result.unwrap_err().to_string().contains("invalid characters"));

        assert!(PackageName::new("numpy/core".to_string()).is_err());
        assert!(PackageName::new("pkg name".to_string()).is_err());
    }

    #[test]
    fn test_package_name_rejects_leading_or_trailing_separator() {
        assert!(PackageName::new("-requests".to_string()).is_err());
        assert!(PackageName::new("requests.".to_string()).is_err());
    }

    #[test]
    fn test_package_name_too_long() {
        let result = PackageName::new("a".repeat(MAX_PACKAGE_NAME_LENGTH + 1));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_normalized_name() {
        let name = PackageName::new("Flask_SQLAlchemy".to_string()).unwrap();
        assert_eq!(name.normalized(), "flask-sqlalchemy");

        let name = PackageName::new("zope..interface".to_string()).unwrap();
        assert_eq!(name.normalized(), "zope-interface");

        let name = PackageName::new("PyYAML".to_string()).unwrap();
        assert_eq!(name.normalized(), "pyyaml");
    }

    #[test]
    fn test_package_name_display() {
        let name = PackageName::new("Django".to_string()).unwrap();
        assert_eq!(format!("{}", name), "Django");
    }
}
