use super::codec::{extract_version, render_new_file, update_content};
use super::types::VersionFileType;
use crate::error::{Error, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// a version file on disk together with its declared type
#[derive(Debug, Clone)]
pub struct VersionFile {
    pub path: PathBuf,
    pub file_type: VersionFileType,
}

/// content change computed for a version file
#[derive(Debug, Clone)]
pub struct PlannedUpdate {
    pub previous_version: Option<String>,
    pub existed: bool,
    pub content: String,
    pub changed: bool,
}

impl VersionFile {
    pub fn new<P: AsRef<Path>>(path: P, file_type: VersionFileType) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file_type,
        }
    }

    /// declared version, `None` if the file or its declaration is missing
    pub fn read_version(&self) -> Result<Option<String>> {
        match self.read_existing()? {
            Some(content) => extract_version(self.file_type, &content, &self.path),
            None => Ok(None),
        }
    }

    /// compute the new content without touching the file
    pub fn plan(&self, version: &str) -> Result<PlannedUpdate> {
        let update = match self.read_existing()? {
            Some(current) => {
                let previous_version = extract_version(self.file_type, &current, &self.path)?;
                let content = update_content(self.file_type, &current, version, &self.path)?;
                PlannedUpdate {
                    previous_version,
                    existed: true,
                    changed: content != current,
                    content,
                }
            }
            None => PlannedUpdate {
                previous_version: None,
                existed: false,
                content: render_new_file(self.file_type, version),
                changed: true,
            },
        };

        Ok(update)
    }

    /// write `version` into the file, skipping the write when nothing changes
    pub fn write_version(&self, version: &str) -> Result<PlannedUpdate> {
        let update = self.plan(version)?;

        if update.changed {
            self.persist(&update.content)?;
            debug!(
                path = %self.path.display(),
                file_type = %self.file_type,
                previous = ?update.previous_version,
                version,
                "version file written"
            );
        } else {
            debug!(path = %self.path.display(), version, "version file already up to date");
        }

        Ok(update)
    }

    fn read_existing(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::FileReadError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// replace the file through a temporary sibling so readers never see partial content
    fn persist(&self, content: &str) -> Result<()> {
        let write_error = |source: std::io::Error| Error::FileWriteError {
            path: self.path.clone(),
            source,
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_error)?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(write_error)?;
        temp.write_all(content.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;

        // temporary files are created owner-only
        match fs::metadata(&self.path) {
            Ok(metadata) => fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(write_error)?,
            #[cfg(unix)]
            Err(_) => {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o644))
                    .map_err(write_error)?
            }
            #[cfg(not(unix))]
            Err(_) => {}
        }

        temp.persist(&self.path).map_err(|e| write_error(e.error))?;

        Ok(())
    }
}
