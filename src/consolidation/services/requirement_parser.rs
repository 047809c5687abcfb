use crate::consolidation::domain::{
    ConstraintOperator, PackageName, RequirementEntry, Version, VersionConstraint,
};
use crate::shared::error::SweepError;

/// Result of parsing one requirements listing
#[derive(Debug, Default)]
pub struct ParsedRequirements {
    /// Well-formed entries in file order
    pub entries: Vec<RequirementEntry>,
    /// One `SweepError::ParseError` per malformed line
    pub errors: Vec<SweepError>,
}

/// RequirementParser - turns pipreqs output into requirement entries
///
/// Accepted line shape: `name[extras] (op version)? (; marker)? (# comment)?`.
/// Extras and markers are dropped. Blank lines and comments are ignored.
pub struct RequirementParser;

impl RequirementParser {
    /// Parses a whole listing, collecting malformed lines instead of failing
    ///
    /// # Arguments
    /// * `content` - Normalized (UTF-8, LF) requirements text
    /// * `source` - Label of the folder the listing belongs to
    pub fn parse(content: &str, source: &str) -> ParsedRequirements {
        let mut parsed = ParsedRequirements::default();

        for (index, raw_line) in content.lines().enumerate() {
            match Self::parse_line(raw_line) {
                Ok(Some(entry)) => parsed.entries.push(entry.with_source(source)),
                Ok(None) => {}
                Err(details) => parsed.errors.push(SweepError::ParseError {
                    source_name: source.to_string(),
                    line_number: index + 1,
                    line: raw_line.trim().to_string(),
                    details,
                }),
            }
        }

        parsed
    }

    /// Parses a single line; `Ok(None)` for blank and comment lines
    pub fn parse_line(raw_line: &str) -> Result<Option<RequirementEntry>, String> {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            return Ok(None);
        }

        if line.starts_with('-') {
            return Err("pip options are not supported in consolidated output".to_string());
        }
        if line.contains("://") || line.contains(" @ ") {
            return Err("URL requirements are not supported".to_string());
        }

        // Environment markers are dropped
        let requirement = line.split(';').next().unwrap_or(line).trim();

        let name_end = requirement
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(requirement.len());
        let name = &requirement[..name_end];
        if name.is_empty() {
            return Err("missing package name".to_string());
        }
        let name = PackageName::new(name.to_string()).map_err(|e| e.to_string())?;

        let mut rest = requirement[name_end..].trim_start();
        if let Some(extras) = rest.strip_prefix('[') {
            let close = extras
                .find(']')
                .ok_or_else(|| "unterminated extras list".to_string())?;
            rest = extras[close + 1..].trim_start();
        }

        if rest.is_empty() {
            return Ok(Some(RequirementEntry::new(name, None)));
        }

        let constraint = parse_constraint(rest)?;
        Ok(Some(RequirementEntry::new(name, Some(constraint))))
    }
}

/// A `#` starts a comment at the beginning of a line or after whitespace
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_constraint(text: &str) -> Result<VersionConstraint, String> {
    let operator = ConstraintOperator::PARSE_ORDER
        .into_iter()
        .find(|op| text.starts_with(op.as_str()))
        .ok_or_else(|| format!("unexpected text '{}' after package name", text))?;

    let version = text[operator.as_str().len()..].trim();
    if version.contains(',') {
        return Err("multiple version specifiers are not supported".to_string());
    }

    let version = Version::new(version.to_string()).map_err(|e| e.to_string())?;
    Ok(VersionConstraint::new(operator, version))
}
