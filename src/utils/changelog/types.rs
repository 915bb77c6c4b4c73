// changelog data structures

use crate::utils::severity::Issue;
use chrono::NaiveDate;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// a released section of the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub version: Version,
    pub date: NaiveDate,
    pub line_number: usize,
    /// markdown between this header and the next section header
    pub notes: String,
}

impl Release {
    pub fn new(version: Version, date: NaiveDate, line_number: usize) -> Self {
        Self {
            version,
            date,
            line_number,
            notes: String::new(),
        }
    }
}

/// the `## [Unreleased]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreleasedSection {
    pub line_number: usize,
    pub notes: String,
}

/// parsed changelog, releases kept in document order (newest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogDocument {
    pub path: PathBuf,
    pub unreleased: Option<UnreleasedSection>,
    pub releases: Vec<Release>,
    pub issues: Vec<Issue>,
}

impl ChangelogDocument {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            unreleased: None,
            releases: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// newest release, i.e. the first one in the document
    pub fn latest_release(&self) -> Option<&Release> {
        self.releases.first()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.is_error())
    }
}
