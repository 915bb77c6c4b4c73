use serde::{Deserialize, Serialize};
use std::fmt;

/// severity level for issues detected in a changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// error-level issue that fails the run in strict mode
    Error,
    /// warning-level issue that is informational only
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Error => write!(f, "ERROR"),
            IssueSeverity::Warning => write!(f, "WARN"),
        }
    }
}

/// type of issue detected in a changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// release header matched but its date is not a calendar date
    InvalidDate,
    /// release header matched but its version is not valid semver
    InvalidVersion,
    /// release is not older than the release above it
    UnorderedRelease,
    /// same version released twice
    DuplicateRelease,
    /// unreleased section after a release or repeated
    MisplacedUnreleased,
    /// release date is later than the date of the release above it
    DateOrder,
}

impl IssueType {
    /// severity assigned to this issue type
    pub fn default_severity(self) -> IssueSeverity {
        match self {
            IssueType::DateOrder => IssueSeverity::Warning,
            _ => IssueSeverity::Error,
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueType::InvalidDate => write!(f, "invalid_date"),
            IssueType::InvalidVersion => write!(f, "invalid_version"),
            IssueType::UnorderedRelease => write!(f, "unordered_release"),
            IssueType::DuplicateRelease => write!(f, "duplicate_release"),
            IssueType::MisplacedUnreleased => write!(f, "misplaced_unreleased"),
            IssueType::DateOrder => write!(f, "date_order"),
        }
    }
}

/// structured issue with severity, type, location and message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: IssueSeverity,
    pub issue_type: IssueType,
    pub line_number: usize,
    pub message: String,
}

impl Issue {
    /// create an issue with the default severity of its type
    pub fn new(issue_type: IssueType, line_number: usize, message: impl Into<String>) -> Self {
        Self {
            severity: issue_type.default_severity(),
            issue_type,
            line_number,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == IssueSeverity::Warning
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] line {}: {} ({})",
            self.severity, self.line_number, self.message, self.issue_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_order_is_only_a_warning() {
        let issue = Issue::new(IssueType::DateOrder, 7, "dates out of order");
        assert!(issue.is_warning());
        assert!(!issue.is_error());

        let issue = Issue::new(IssueType::UnorderedRelease, 7, "0.1.0 above 0.2.0");
        assert!(issue.is_error());
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::new(IssueType::InvalidDate, 3, "bad date '2023-02-30'");
        assert_eq!(
            issue.to_string(),
            "[ERROR] line 3: bad date '2023-02-30' (invalid_date)"
        );
    }
}
