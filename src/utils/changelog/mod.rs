// changelog parsing and validation

pub mod config;
pub mod parser;
pub mod types;
pub mod validator;

pub use config::{ChangelogConfig, ChangelogPatterns};
pub use parser::{parse_changelog, parse_changelog_str};
pub use types::{ChangelogDocument, Release, UnreleasedSection};
pub use validator::validate_changelog;
