use super::changelog::ChangelogConfig;
use super::version_file::VersionFileType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "changelog2version.toml";

/// main configuration for changelog2version
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Changelog2VersionConfig {
    /// changelog header patterns
    #[serde(default)]
    pub changelog: ChangelogConfig,

    /// type used when none is given on the command line
    #[serde(default)]
    pub version_file_type: Option<VersionFileType>,

    /// suffix appended to the changelog version, e.g. `-rc.1`
    #[serde(default)]
    pub additional_version_info: Option<String>,

    /// fail on error-level changelog issues instead of logging them
    #[serde(default)]
    pub strict: bool,
}

impl Changelog2VersionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changelog(mut self, changelog: ChangelogConfig) -> Self {
        self.changelog = changelog;
        self
    }

    pub fn version_file_type(mut self, file_type: VersionFileType) -> Self {
        self.version_file_type = Some(file_type);
        self
    }

    pub fn additional_version_info(mut self, info: impl Into<String>) -> Self {
        self.additional_version_info = Some(info.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Changelog2VersionConfig =
            toml::from_str(&contents).map_err(|e| Error::TomlParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// load `changelog2version.toml` from `dir`, defaults when there is none
    ///
    /// unlike a missing file, a malformed one is reported as an error
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        match Self::find_config_file(dir) {
            Some(config_path) => Self::load_from_file(config_path),
            None => Ok(Self::default()),
        }
    }

    /// find configuration file in `dir`
    pub fn find_config_file<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        let config_path = dir.as_ref().join(CONFIG_FILE_NAME);

        if config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::changelog::config::DEFAULT_RELEASE_LINE_REGEX;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Changelog2VersionConfig::discover(temp_dir.path()).unwrap();

        assert!(!config.strict);
        assert!(config.version_file_type.is_none());
        assert_eq!(config.changelog.release_line_regex, DEFAULT_RELEASE_LINE_REGEX);
    }

    #[test]
    fn test_discover_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"
version_file_type = "python"
strict = true

[changelog]
unreleased_line_regex = '^## Next$'
"#,
        )
        .unwrap();

        let config = Changelog2VersionConfig::discover(temp_dir.path()).unwrap();
        assert!(config.strict);
        assert_eq!(config.version_file_type, Some(VersionFileType::Py));
        assert_eq!(config.changelog.unreleased_line_regex, "^## Next$");
        // unspecified keys keep their defaults
        assert_eq!(config.changelog.release_line_regex, DEFAULT_RELEASE_LINE_REGEX);
    }

    #[test]
    fn test_discover_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "strict = maybe").unwrap();

        assert!(matches!(
            Changelog2VersionConfig::discover(temp_dir.path()),
            Err(Error::TomlParseError { .. })
        ));
    }

    #[test]
    fn test_unknown_version_file_type_in_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "version_file_type = \"yaml\"").unwrap();

        assert!(Changelog2VersionConfig::load_from_file(&path).is_err());
    }
}
