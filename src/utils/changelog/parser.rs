// changelog parser

use super::config::ChangelogPatterns;
use super::types::{ChangelogDocument, Release, UnreleasedSection};
use crate::error::{Error, Result};
use crate::utils::severity::{Issue, IssueType};
use chrono::NaiveDate;
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// section whose body is currently being collected
enum Section {
    None,
    Unreleased,
    Release,
}

/// parse a changelog file
pub fn parse_changelog<P: AsRef<Path>>(
    path: P,
    patterns: &ChangelogPatterns,
) -> Result<ChangelogDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_changelog_str(&content, path.to_path_buf(), patterns)
}

/// parse changelog content, `path` is only used for reporting
pub fn parse_changelog_str(
    content: &str,
    path: PathBuf,
    patterns: &ChangelogPatterns,
) -> Result<ChangelogDocument> {
    let mut document = ChangelogDocument::new(path);
    let mut section = Section::None;
    let mut notes: Vec<&str> = Vec::new();
    let mut matched_headers = 0;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();

        if let Some(captures) = patterns.release.captures(trimmed) {
            matched_headers += 1;
            flush_notes(&mut document, &section, &mut notes);
            section = Section::None;

            // groups may sit in an optional branch of a configured pattern
            let Some(version_str) = captures.name("version").map(|m| m.as_str()) else {
                document.issues.push(Issue::new(
                    IssueType::InvalidVersion,
                    line_number,
                    format!("release header '{}' has no version", trimmed),
                ));
                continue;
            };
            let Some(date_str) = captures.name("date").map(|m| m.as_str()) else {
                document.issues.push(Issue::new(
                    IssueType::InvalidDate,
                    line_number,
                    format!("release header '{}' has no date", trimmed),
                ));
                continue;
            };
            trace!(line_number, version = version_str, date = date_str, "release header");

            let version = match Version::parse(version_str) {
                Ok(version) => version,
                Err(e) => {
                    document.issues.push(Issue::new(
                        IssueType::InvalidVersion,
                        line_number,
                        format!("could not parse version '{}': {}", version_str, e),
                    ));
                    continue;
                }
            };

            let date = match NaiveDate::parse_from_str(date_str, DATE_FORMAT) {
                Ok(date) => date,
                Err(e) => {
                    document.issues.push(Issue::new(
                        IssueType::InvalidDate,
                        line_number,
                        format!("could not parse date '{}' of {}: {}", date_str, version, e),
                    ));
                    continue;
                }
            };

            document
                .releases
                .push(Release::new(version, date, line_number));
            section = Section::Release;
            continue;
        }

        if patterns.unreleased.is_match(trimmed) {
            flush_notes(&mut document, &section, &mut notes);
            section = Section::None;

            if !document.releases.is_empty() {
                document.issues.push(Issue::new(
                    IssueType::MisplacedUnreleased,
                    line_number,
                    "unreleased section must precede all releases",
                ));
            } else if document.unreleased.is_some() {
                document.issues.push(Issue::new(
                    IssueType::MisplacedUnreleased,
                    line_number,
                    "more than one unreleased section",
                ));
            } else {
                document.unreleased = Some(UnreleasedSection {
                    line_number,
                    notes: String::new(),
                });
                section = Section::Unreleased;
            }
            continue;
        }

        // any other level-two (or higher) header closes the current section
        if is_section_header(trimmed) {
            flush_notes(&mut document, &section, &mut notes);
            section = Section::None;
            continue;
        }

        if is_link_definition(trimmed) {
            continue;
        }

        if !matches!(section, Section::None) {
            notes.push(line);
        }
    }

    flush_notes(&mut document, &section, &mut notes);

    if document.releases.is_empty() {
        let reason = if matched_headers == 0 {
            "no line matches the release header pattern".to_string()
        } else {
            format!(
                "{} release header(s) matched but none could be parsed",
                matched_headers
            )
        };
        return Err(Error::ParseError {
            path: document.path,
            reason,
        });
    }

    debug!(
        path = %document.path.display(),
        releases = document.releases.len(),
        unreleased = document.unreleased.is_some(),
        "parsed changelog"
    );

    Ok(document)
}

fn is_section_header(line: &str) -> bool {
    (line.starts_with("##") && !line.starts_with("###"))
        || line.starts_with("# ")
        || line == "#"
}

/// markdown link reference like `[0.1.0]: https://...`
fn is_link_definition(line: &str) -> bool {
    line.strip_prefix('[')
        .and_then(|rest| rest.split_once("]:"))
        .is_some_and(|(label, _)| !label.is_empty())
}

fn flush_notes(document: &mut ChangelogDocument, section: &Section, notes: &mut Vec<&str>) {
    let text = join_notes(notes);
    notes.clear();

    match section {
        Section::None => {}
        Section::Unreleased => {
            if let Some(unreleased) = document.unreleased.as_mut() {
                unreleased.notes = text;
            }
        }
        Section::Release => {
            if let Some(release) = document.releases.last_mut() {
                release.notes = text;
            }
        }
    }
}

fn join_notes(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());

    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::changelog::ChangelogConfig;

    fn parse(content: &str) -> Result<ChangelogDocument> {
        let patterns = ChangelogConfig::default().compile().unwrap();
        parse_changelog_str(content, PathBuf::from("changelog.md"), &patterns)
    }

    const CHANGELOG: &str = "\
# Changelog
All notable changes to this project will be documented in this file.

## [Unreleased]
### Added
- something pending

## [0.2.0] - 2023-01-01
### Added
- `format_timestamp` helper

### Fixed
- logger level

## [0.1.0] - 2022-09-09
### Added
- initial release

[Unreleased]: https://example.com/compare/0.2.0...main
[0.2.0]: https://example.com/tree/0.2.0
";

    #[test]
    fn test_parse_releases_newest_first() {
        let document = parse(CHANGELOG).unwrap();
        assert_eq!(document.releases.len(), 2);

        let latest = document.latest_release().unwrap();
        assert_eq!(latest.version, Version::new(0, 2, 0));
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(latest.line_number, 8);
        assert_eq!(document.releases[1].version, Version::new(0, 1, 0));
        assert!(document.issues.is_empty());
    }

    #[test]
    fn test_parse_collects_notes() {
        let document = parse(CHANGELOG).unwrap();

        let unreleased = document.unreleased.as_ref().unwrap();
        assert_eq!(unreleased.line_number, 4);
        assert_eq!(unreleased.notes, "### Added\n- something pending");

        let latest = document.latest_release().unwrap();
        assert_eq!(
            latest.notes,
            "### Added\n- `format_timestamp` helper\n\n### Fixed\n- logger level"
        );

        // link definitions do not leak into the oldest release
        assert_eq!(document.releases[1].notes, "### Added\n- initial release");
    }

    #[test]
    fn test_parse_without_release_fails() {
        let err = parse("# Changelog\n\n## [Unreleased]\n- wip\n").unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
        assert!(err.to_string().contains("no line matches"));
    }

    #[test]
    fn test_parse_invalid_date_is_recorded() {
        let content = "## [0.3.0] - 2023-02-30\n\n## [0.2.0] - 2023-01-01\n";
        let document = parse(content).unwrap();

        assert_eq!(document.releases.len(), 1);
        assert_eq!(document.releases[0].version, Version::new(0, 2, 0));
        assert_eq!(document.issues.len(), 1);
        assert_eq!(document.issues[0].issue_type, IssueType::InvalidDate);
        assert_eq!(document.issues[0].line_number, 1);
    }

    #[test]
    fn test_parse_only_invalid_headers_fails() {
        let err = parse("## [01.0.0] - 2023-01-01\n").unwrap_err();
        assert!(err.to_string().contains("none could be parsed"));
    }

    #[test]
    fn test_parse_optional_groups_do_not_panic() {
        let patterns = ChangelogConfig::new()
            .release_line_regex(
                r"^## (?:\[(?P<version>\d+\.\d+\.\d+)\]|unnamed) - (?:(?P<date>\d{4}-\d{2}-\d{2})|someday)$",
            )
            .compile()
            .unwrap();
        let content = "## unnamed - 2023-01-01\n## [0.3.0] - someday\n## [0.2.0] - 2023-01-01\n";
        let document =
            parse_changelog_str(content, PathBuf::from("changelog.md"), &patterns).unwrap();

        assert_eq!(document.releases.len(), 1);
        assert_eq!(document.releases[0].version, Version::new(0, 2, 0));
        assert_eq!(document.issues.len(), 2);
        assert_eq!(document.issues[0].issue_type, IssueType::InvalidVersion);
        assert_eq!(document.issues[0].line_number, 1);
        assert_eq!(document.issues[1].issue_type, IssueType::InvalidDate);
        assert_eq!(document.issues[1].line_number, 2);
    }

    #[test]
    fn test_parse_misplaced_unreleased() {
        let content = "## [0.2.0] - 2023-01-01\n\n## [Unreleased]\n- late\n";
        let document = parse(content).unwrap();

        assert!(document.unreleased.is_none());
        assert_eq!(document.issues.len(), 1);
        assert_eq!(document.issues[0].issue_type, IssueType::MisplacedUnreleased);
        assert!(document.releases[0].notes.is_empty());
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let content = "# Changelog\r\n\r\n## [1.0.0] - 2024-05-01\r\n- done\r\n";
        let document = parse(content).unwrap();
        assert_eq!(document.releases[0].version, Version::new(1, 0, 0));
        assert_eq!(document.releases[0].notes, "- done");
    }

    #[test]
    fn test_link_definition_detection() {
        assert!(is_link_definition("[0.1.0]: https://example.com"));
        assert!(!is_link_definition("[]: nothing"));
        assert!(!is_link_definition("- [link](https://example.com)"));
    }
}
