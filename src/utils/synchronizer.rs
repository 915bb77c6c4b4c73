use super::changelog::{
    ChangelogDocument, ChangelogPatterns, Release, parse_changelog, validate_changelog,
};
use super::config::Changelog2VersionConfig;
use super::severity::Issue;
use super::version_file::{PlannedUpdate, VersionFile, VersionFileType};
use crate::error::{Error, Result};
use semver::Version;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// outcome of a sync or check run
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub changelog_file: PathBuf,
    pub version_file: PathBuf,
    pub version_file_type: VersionFileType,
    /// newest release found in the changelog
    pub release: Release,
    /// version declared in the file, including additional version info
    pub version: String,
    /// version declared before the run, if any
    pub previous_version: Option<String>,
    /// whether the file content differs (or would differ) from the rendering
    pub changed: bool,
    /// whether the file declares `version` after the run
    pub up_to_date: bool,
    pub issues: Vec<Issue>,
}

/// keeps a version file in line with the newest changelog release
#[derive(Debug, Clone)]
pub struct VersionSynchronizer {
    config: Changelog2VersionConfig,
    patterns: ChangelogPatterns,
}

impl VersionSynchronizer {
    pub fn new(config: Changelog2VersionConfig) -> Result<Self> {
        let patterns = config.changelog.compile()?;
        Ok(Self { config, patterns })
    }

    /// pick the version file type: explicit request, then config, then file extension
    pub fn resolve_file_type(
        &self,
        requested: Option<&str>,
        version_file: &Path,
    ) -> Result<VersionFileType> {
        let file_type = match (requested, self.config.version_file_type) {
            (Some(name), _) => name.parse::<VersionFileType>()?,
            (None, Some(configured)) => configured,
            (None, None) => VersionFileType::from_path(version_file)?,
        };

        debug!(%file_type, path = %version_file.display(), "resolved version file type");
        Ok(file_type)
    }

    /// parse and validate the changelog
    ///
    /// in strict mode error-level issues fail with [`Error::ChangelogInvalid`],
    /// otherwise they are logged and kept in the document
    pub fn load_changelog<P: AsRef<Path>>(&self, changelog_file: P) -> Result<ChangelogDocument> {
        let mut document = parse_changelog(changelog_file, &self.patterns)?;
        let issues = validate_changelog(&document);
        document.issues.extend(issues);

        for issue in &document.issues {
            warn!(path = %document.path.display(), "{}", issue);
        }

        if self.config.strict && document.has_errors() {
            return Err(Error::ChangelogInvalid {
                path: document.path.clone(),
                errors: document
                    .issues
                    .iter()
                    .filter(|i| i.is_error())
                    .map(|i| i.to_string())
                    .collect(),
            });
        }

        Ok(document)
    }

    /// newest release of the changelog
    pub fn latest_release<P: AsRef<Path>>(&self, changelog_file: P) -> Result<Release> {
        let document = self.load_changelog(changelog_file)?;
        latest_of(&document).cloned()
    }

    /// release version plus the configured additional version info
    pub fn resolve_version(&self, release: &Release) -> Result<String> {
        let base = release.version.to_string();

        let version = match self.config.additional_version_info.as_deref() {
            Some(info) if !info.trim().is_empty() => format!("{}{}", base, info.trim()),
            _ => return Ok(base),
        };

        Version::parse(&version).map_err(|e| Error::InvalidVersion {
            version: version.clone(),
            source: e,
        })?;

        Ok(version)
    }

    /// write the newest changelog version into `version_file`
    pub fn sync<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        changelog_file: P,
        version_file: Q,
        file_type: VersionFileType,
    ) -> Result<SyncReport> {
        let (document, release, version) = self.prepare(changelog_file.as_ref())?;
        let file = VersionFile::new(version_file, file_type);
        let update = file.write_version(&version)?;

        info!(
            version = %version,
            previous = ?update.previous_version,
            path = %file.path.display(),
            changed = update.changed,
            "version file synchronized"
        );

        Ok(build_report(document, release, version, &file, update, true))
    }

    /// compare `version_file` against the changelog without writing
    pub fn check<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        changelog_file: P,
        version_file: Q,
        file_type: VersionFileType,
    ) -> Result<SyncReport> {
        let (document, release, version) = self.prepare(changelog_file.as_ref())?;
        let file = VersionFile::new(version_file, file_type);
        let update = file.plan(&version)?;

        let up_to_date = update.previous_version.as_deref() == Some(version.as_str());
        info!(
            version = %version,
            declared = ?update.previous_version,
            path = %file.path.display(),
            up_to_date,
            "version file checked"
        );

        Ok(build_report(document, release, version, &file, update, up_to_date))
    }

    fn prepare(&self, changelog_file: &Path) -> Result<(ChangelogDocument, Release, String)> {
        let document = self.load_changelog(changelog_file)?;
        let release = latest_of(&document)?.clone();
        let version = self.resolve_version(&release)?;
        debug!(release = %release.version, date = %release.date, %version, "latest release");
        Ok((document, release, version))
    }
}

fn latest_of(document: &ChangelogDocument) -> Result<&Release> {
    document.latest_release().ok_or_else(|| Error::ParseError {
        path: document.path.clone(),
        reason: "changelog contains no release".to_string(),
    })
}

fn build_report(
    document: ChangelogDocument,
    release: Release,
    version: String,
    file: &VersionFile,
    update: PlannedUpdate,
    up_to_date: bool,
) -> SyncReport {
    SyncReport {
        changelog_file: document.path,
        version_file: file.path.clone(),
        version_file_type: file.file_type,
        release,
        version,
        previous_version: update.previous_version,
        changed: update.changed,
        up_to_date,
        issues: document.issues,
    }
}
