// changelog pattern configuration

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// default header of a released section, e.g. `## [0.2.0] - 2023-01-01`
pub const DEFAULT_RELEASE_LINE_REGEX: &str =
    r"^##\s*\[(?P<version>\d+\.\d+\.\d+)\]\s*-\s*(?P<date>\d{4}-\d{2}-\d{2})\s*$";

/// default header of the unreleased section, e.g. `## [Unreleased]`
pub const DEFAULT_UNRELEASED_LINE_REGEX: &str = r"(?i)^##\s*\[unreleased\]\s*$";

/// configuration for changelog parsing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// pattern of a release header, must define `version` and `date` groups
    pub release_line_regex: String,

    /// pattern of the unreleased section header
    pub unreleased_line_regex: String,
}

impl ChangelogConfig {
    /// create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release_line_regex(mut self, pattern: impl Into<String>) -> Self {
        self.release_line_regex = pattern.into();
        self
    }

    pub fn unreleased_line_regex(mut self, pattern: impl Into<String>) -> Self {
        self.unreleased_line_regex = pattern.into();
        self
    }

    /// compile the configured patterns
    pub fn compile(&self) -> Result<ChangelogPatterns> {
        let release = compile_pattern(&self.release_line_regex)?;
        for group in ["version", "date"] {
            if !release.capture_names().flatten().any(|name| name == group) {
                return Err(Error::InvalidPattern {
                    pattern: self.release_line_regex.clone(),
                    reason: format!("missing named group '{}'", group),
                });
            }
        }

        let unreleased = compile_pattern(&self.unreleased_line_regex)?;

        Ok(ChangelogPatterns {
            release,
            unreleased,
        })
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            release_line_regex: DEFAULT_RELEASE_LINE_REGEX.to_string(),
            unreleased_line_regex: DEFAULT_UNRELEASED_LINE_REGEX.to_string(),
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// compiled header patterns used by the parser
#[derive(Debug, Clone)]
pub struct ChangelogPatterns {
    pub release: Regex,
    pub unreleased: Regex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_compile() {
        let patterns = ChangelogConfig::default().compile().unwrap();
        assert!(patterns.release.is_match("## [0.2.0] - 2023-01-01"));
        assert!(patterns.release.is_match("##[10.20.30]-2023-01-01"));
        assert!(!patterns.release.is_match("## [0.2] - 2023-01-01"));
        assert!(!patterns.release.is_match("### [0.2.0] - 2023-01-01"));
        assert!(patterns.unreleased.is_match("## [Unreleased]"));
        assert!(patterns.unreleased.is_match("## [unreleased]"));
    }

    #[test]
    fn test_release_pattern_requires_named_groups() {
        let config = ChangelogConfig::new().release_line_regex(r"^## \[(\d+\.\d+\.\d+)\]$");
        let err = config.compile().unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let config = ChangelogConfig::new().unreleased_line_regex("^## [unclosed");
        assert!(matches!(
            config.compile(),
            Err(Error::InvalidPattern { .. })
        ));
    }
}
