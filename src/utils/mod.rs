pub mod changelog;
pub mod config;
pub mod logging;
pub mod severity;
pub mod synchronizer;
pub mod version_file;
