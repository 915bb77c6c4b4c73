use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// format of the generated version declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionFileType {
    /// `__version__ = "1.2.3"`
    #[serde(alias = "python", alias = "declaration")]
    Py,
    /// `#define VERSION "1.2.3"`
    #[serde(alias = "h", alias = "header")]
    C,
    /// `{"version": "1.2.3"}`
    Json,
}

impl VersionFileType {
    /// canonical names accepted on the command line
    pub const SUPPORTED: [&'static str; 3] = ["py", "c", "json"];

    pub fn name(self) -> &'static str {
        match self {
            VersionFileType::Py => "py",
            VersionFileType::C => "c",
            VersionFileType::Json => "json",
        }
    }

    /// infer the type from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        extension.parse().map_err(|_| Error::UnsupportedFormat {
            format: format!("<inferred from '{}'>", path.display()),
        })
    }
}

impl fmt::Display for VersionFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for VersionFileType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "py" | "python" | "declaration" => Ok(VersionFileType::Py),
            "c" | "h" | "header" => Ok(VersionFileType::C),
            "json" => Ok(VersionFileType::Json),
            _ => Err(Error::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}
