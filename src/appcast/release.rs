//! The transient release record assembled once per run.

use super::manifest::AppManifest;
use regex::Regex;
use std::sync::LazyLock;

/// A version string containing an ASCII lowercase letter flags a
/// prerelease, e.g. "4.2.0b1" or "5.0-rc".
static PRERELEASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z]").expect("valid prerelease pattern"));

/// Everything the feed renderer needs, collected across the pipeline.
#[derive(Clone, Debug)]
pub struct ReleaseInfo {
    /// Display name (CFBundleName)
    pub app_name: String,

    /// Short version string (CFBundleShortVersionString)
    pub version: String,

    /// Build number (CFBundleVersion)
    pub build_number: String,

    /// Minimum macOS version (LSMinimumSystemVersion)
    pub min_system_version: String,

    /// Disk-image filename, `{prefix}{version}.dmg`
    pub dmg_name: String,

    /// Disk-image length in bytes
    pub dmg_size: u64,

    /// Whether this version goes only to the beta feed
    pub prerelease: bool,

    /// Base64 DSA signature, appended by the signing stage
    pub signature: Option<String>,
}

impl ReleaseInfo {
    /// Build the record from the manifest and the disk-image facts.
    pub fn new(manifest: AppManifest, dmg_name: String, dmg_size: u64) -> Self {
        let prerelease = is_prerelease(&manifest.version);
        Self {
            app_name: manifest.app_name,
            version: manifest.version,
            build_number: manifest.build_number,
            min_system_version: manifest.min_system_version,
            dmg_name,
            dmg_size,
            prerelease,
            signature: None,
        }
    }
}

/// Whether the version string flags a prerelease.
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE.is_match(version)
}
