//! Configuration file support for reqs-sweep.
//!
//! Provides YAML-based configuration through `reqs-sweep.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::adapters::outbound::process::PinMode;
use crate::application::dto::OutputFormat;
use crate::consolidation::policies::MergePolicy;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "reqs-sweep.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Output file, relative to the scan root unless absolute.
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub exclude_dirs: Option<Vec<String>>,
    pub merge_policy: Option<String>,
    pub mode: Option<String>,
    pub pipreqs: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file deserializes as YAML null
    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref patterns) = config.exclude_dirs {
        for (i, pattern) in patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                bail!(
                    "Invalid config: exclude_dirs[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a folder name or a wildcard pattern (e.g., \"build-*\").",
                    i
                );
            }
        }
    }
    if let Some(ref format) = config.format {
        OutputFormat::from_str(format).map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    if let Some(ref policy) = config.merge_policy {
        MergePolicy::from_str(policy).map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    if let Some(ref mode) = config.mode {
        PinMode::from_str(mode).map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
output: deps/requirements.txt
format: json
exclude_dirs:
  - build
  - "tmp-*"
merge_policy: last
mode: compat
pipreqs: /opt/tools/pipreqs
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("deps/requirements.txt")));
        assert_eq!(config.format.as_deref(), Some("json"));
        assert_eq!(
            config.exclude_dirs.as_deref(),
            Some(&["build".to_string(), "tmp-*".to_string()][..])
        );
        assert_eq!(config.merge_policy.as_deref(), Some("last"));
        assert_eq!(config.mode.as_deref(), Some("compat"));
        assert_eq!(config.pipreqs, Some(PathBuf::from("/opt/tools/pipreqs")));
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: text\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format.as_deref(), Some("text"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_empty_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.format.is_none());
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_exclude_entry_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "exclude_dirs:\n  - \"   \"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("exclude_dirs[0] must not be empty"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");

        for (content, expected) in [
            ("format: xml\n", "Invalid format"),
            ("merge_policy: newest\n", "Invalid merge policy"),
            ("mode: exact\n", "Invalid pin mode"),
        ] {
            fs::write(&config_path, content).unwrap();
            let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
            assert!(err.contains(expected), "{} -> {}", content, err);
        }
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
check_cve: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("check_cve"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.output.is_none());
        assert!(config.format.is_none());
        assert!(config.exclude_dirs.is_none());
        assert!(config.merge_policy.is_none());
        assert!(config.mode.is_none());
        assert!(config.pipreqs.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
