pub mod error;
pub mod utils;

pub use error::*;
pub use utils::changelog::{
    ChangelogConfig, ChangelogDocument, ChangelogPatterns, Release, UnreleasedSection,
    parse_changelog, parse_changelog_str, validate_changelog,
};
pub use utils::config::{CONFIG_FILE_NAME, Changelog2VersionConfig};
pub use utils::logging::init_logging;
pub use utils::severity::{Issue, IssueSeverity, IssueType};
pub use utils::synchronizer::{SyncReport, VersionSynchronizer};
pub use utils::version_file::{PlannedUpdate, VersionFile, VersionFileType};
