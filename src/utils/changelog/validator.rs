// changelog validator

use super::types::ChangelogDocument;
use crate::utils::severity::{Issue, IssueType};
use std::collections::HashMap;

/// check release ordering and uniqueness
///
/// returns the issues found, the document itself is not modified
pub fn validate_changelog(document: &ChangelogDocument) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&semver::Version, usize> = HashMap::new();

    for (index, release) in document.releases.iter().enumerate() {
        if let Some(first_line) = seen.get(&release.version) {
            issues.push(Issue::new(
                IssueType::DuplicateRelease,
                release.line_number,
                format!(
                    "version {} already released at line {}",
                    release.version, first_line
                ),
            ));
            continue;
        }
        seen.insert(&release.version, release.line_number);

        let Some(previous) = index.checked_sub(1).map(|i| &document.releases[i]) else {
            continue;
        };

        if release.version >= previous.version {
            issues.push(Issue::new(
                IssueType::UnorderedRelease,
                release.line_number,
                format!(
                    "version {} listed below {}, releases must be ordered newest first",
                    release.version, previous.version
                ),
            ));
        }

        if release.date > previous.date {
            issues.push(Issue::new(
                IssueType::DateOrder,
                release.line_number,
                format!(
                    "version {} dated {} is later than {} dated {}",
                    release.version, release.date, previous.version, previous.date
                ),
            ));
        }
    }

    issues
}
