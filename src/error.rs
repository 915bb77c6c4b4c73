use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    FileWriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    ParseError {
        path: PathBuf,
        reason: String,
    },
    UnsupportedFormat {
        format: String,
    },
    InvalidPattern {
        pattern: String,
        reason: String,
    },
    InvalidVersion {
        version: String,
        source: semver::Error,
    },
    ChangelogInvalid {
        path: PathBuf,
        errors: Vec<String>,
    },
    VersionFileParse {
        path: PathBuf,
        reason: String,
    },
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileReadError { path, source } => {
                write!(f, "failed to read file: {} ({})", path.display(), source)
            }
            Error::FileWriteError { path, source } => {
                write!(f, "failed to write file: {} ({})", path.display(), source)
            }
            Error::TomlParseError { path, source } => {
                write!(
                    f,
                    "failed to parse toml file: {} ({})",
                    path.display(),
                    source
                )
            }
            Error::ParseError { path, reason } => {
                write!(f, "changelog parse error in {}: {}", path.display(), reason)
            }
            Error::UnsupportedFormat { format } => {
                write!(
                    f,
                    "unsupported version file type: '{}' (supported: {})",
                    format,
                    crate::utils::version_file::VersionFileType::SUPPORTED.join(", ")
                )
            }
            Error::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern '{}': {}", pattern, reason)
            }
            Error::InvalidVersion { version, source } => {
                write!(f, "invalid version '{}': {}", version, source)
            }
            Error::ChangelogInvalid { path, errors } => {
                write!(
                    f,
                    "changelog validation failed for {} with {} error(s): {}",
                    path.display(),
                    errors.len(),
                    errors.join("; ")
                )
            }
            Error::VersionFileParse { path, reason } => {
                write!(
                    f,
                    "failed to parse version file {}: {}",
                    path.display(),
                    reason
                )
            }
            Error::IoError(err) => {
                write!(f, "io error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FileReadError { source, .. } => Some(source),
            Error::FileWriteError { source, .. } => Some(source),
            Error::TomlParseError { source, .. } => Some(source),
            Error::InvalidVersion { source, .. } => Some(source),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

