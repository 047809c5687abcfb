use super::package::PackageName;
use super::version::Version;
use crate::shared::Result;

/// Comparison operator of a version specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOperator {
    /// `===`
    ArbitraryEqual,
    /// `==`
    Equal,
    /// `~=`
    Compatible,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `!=`
    NotEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
}

impl ConstraintOperator {
    /// Operators in the order they must be tried when parsing, so that
    /// `===` is not read as `==` followed by `=`.
    pub const PARSE_ORDER: [ConstraintOperator; 8] = [
        ConstraintOperator::ArbitraryEqual,
        ConstraintOperator::Equal,
        ConstraintOperator::Compatible,
        ConstraintOperator::GreaterOrEqual,
        ConstraintOperator::LessOrEqual,
        ConstraintOperator::NotEqual,
        ConstraintOperator::Greater,
        ConstraintOperator::Less,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintOperator::ArbitraryEqual => "===",
            ConstraintOperator::Equal => "==",
            ConstraintOperator::Compatible => "~=",
            ConstraintOperator::GreaterOrEqual => ">=",
            ConstraintOperator::LessOrEqual => "<=",
            ConstraintOperator::NotEqual => "!=",
            ConstraintOperator::Greater => ">",
            ConstraintOperator::Less => "<",
        }
    }
}

impl std::fmt::Display for ConstraintOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single version specifier such as `==2.31.0` or `~=1.26`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionConstraint {
    operator: ConstraintOperator,
    version: Version,
}

impl VersionConstraint {
    pub fn new(operator: ConstraintOperator, version: Version) -> Self {
        Self { operator, version }
    }

    pub fn operator(&self) -> ConstraintOperator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// RequirementEntry value object: one line of a requirements listing
///
/// `source` names the scanned folder (relative to the scan root) the entry
/// was read from. It does not take part in the rendered requirement line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementEntry {
    name: PackageName,
    constraint: Option<VersionConstraint>,
    source: String,
}

impl RequirementEntry {
    pub fn new(name: PackageName, constraint: Option<VersionConstraint>) -> Self {
        Self {
            name,
            constraint,
            source: String::new(),
        }
    }

    /// Convenience constructor for a `name==version` pin
    pub fn pinned(name: &str, version: &str) -> Result<Self> {
        Ok(Self::new(
            PackageName::new(name.to_string())?,
            Some(VersionConstraint::new(
                ConstraintOperator::Equal,
                Version::new(version.to_string())?,
            )),
        ))
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    /// Merge key for this entry (PEP 503 normalized name)
    pub fn key(&self) -> String {
        self.name.normalized()
    }

    pub fn constraint(&self) -> Option<&VersionConstraint> {
        self.constraint.as_ref()
    }

    pub fn version(&self) -> Option<&Version> {
        self.constraint.as_ref().map(VersionConstraint::version)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for RequirementEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.constraint {
            Some(constraint) => write!(f, "{}{}", self.name, constraint),
            None => write!(f, "{}", self.name),
        }
    }
}
