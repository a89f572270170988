//! Error types for release packaging operations.
//!
//! Every external-command boundary reports an explicit error; a failed
//! tool invocation never degrades into an empty value in the rendered feed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all packaging operations
#[derive(Error, Debug)]
pub enum Error {
    /// No .app bundle present in the source folder
    #[error("no application bundle found in {}", .dir.display())]
    MissingBundle {
        /// Directory that was scanned
        dir: PathBuf,
    },

    /// A required Info.plist key is absent or not a string
    #[error("missing key '{key}' in {}", .path.display())]
    ManifestKey {
        /// The Info.plist key
        key: &'static str,
        /// Path to the property list
        path: PathBuf,
    },

    /// Info.plist could not be read or parsed
    #[error("failed to read property list {}: {source}", .path.display())]
    Plist {
        /// Path to the property list
        path: PathBuf,
        /// Underlying plist error
        source: plist::Error,
    },

    /// Settings file could not be parsed
    #[error("invalid settings file {}: {source}", .path.display())]
    Settings {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// An external tool could not be started
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program name
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An external tool exited unsuccessfully
    #[error("{program} failed with {status}: {stderr}")]
    CommandFailed {
        /// Program name
        program: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// Template rendering errors
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
