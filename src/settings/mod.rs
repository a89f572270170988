//! Release settings loaded from an optional TOML file.
//!
//! Defaults mirror a conventional Sparkle project layout, so a bare
//! `dmgcast` invocation works without any settings file. A project overrides
//! them in `appcast.toml`:
//!
//! ```toml
//! [bundle]
//! source_dir = "build"
//! dmg_prefix = "MyApp_"
//!
//! [codesign]
//! identity = "Developer ID Application: Jane Doe (TEAMID)"
//!
//! [signing]
//! backend = "dsa"
//! dsa_key = "sparkle/dsa_priv.pem"
//!
//! [feed]
//! template = "appcast-template.xml"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Complete configuration for one packaging run.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReleaseSettings {
    /// Bundle discovery and disk-image naming
    #[serde(default)]
    pub bundle: BundleSettings,

    /// Disk-image code signing
    #[serde(default)]
    pub codesign: CodesignSettings,

    /// Sparkle signature generation
    #[serde(default)]
    pub signing: SigningSettings,

    /// Appcast template and output names
    #[serde(default)]
    pub feed: FeedSettings,
}

impl ReleaseSettings {
    /// Load settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&raw).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Bundle discovery and disk-image naming.
#[derive(Clone, Debug, Deserialize)]
pub struct BundleSettings {
    /// Folder scanned for the built .app bundle; also the hdiutil source.
    ///
    /// Default: "build"
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Literal prefix of the disk-image filename.
    ///
    /// The image is always named `{dmg_prefix}{version}.dmg`. When unset,
    /// the app name from Info.plist plus an underscore is used.
    #[serde(default)]
    pub dmg_prefix: Option<String>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            dmg_prefix: None,
        }
    }
}

/// Disk-image code signing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CodesignSettings {
    /// Code signing identity name.
    ///
    /// Example: "Developer ID Application: Your Name (TEAMID)"
    ///
    /// Default: None (the codesign step is skipped)
    #[serde(default)]
    pub identity: Option<String>,
}

/// Sparkle signature generation.
#[derive(Clone, Debug, Deserialize)]
pub struct SigningSettings {
    /// Which signature backend to run.
    #[serde(default)]
    pub backend: SigningBackend,

    /// Path to the DSA private key, used by the `dsa` backend.
    ///
    /// Default: "sparkle/dsa_priv.pem"
    #[serde(default = "default_dsa_key")]
    pub dsa_key: PathBuf,

    /// Path to the external generator, used by the `generate-appcast`
    /// backend.
    ///
    /// Default: "sparkle/bin/generate_appcast"
    #[serde(default = "default_generate_appcast")]
    pub generate_appcast: PathBuf,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            backend: SigningBackend::default(),
            dsa_key: default_dsa_key(),
            generate_appcast: default_generate_appcast(),
        }
    }
}

/// Sparkle signature backend.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SigningBackend {
    /// Sign the disk image with the DSA key via openssl and render the
    /// appcast template.
    #[default]
    Dsa,

    /// Delegate signing and feed generation entirely to an external
    /// `generate_appcast` executable.
    GenerateAppcast,
}

/// Appcast template and output names.
#[derive(Clone, Debug, Deserialize)]
pub struct FeedSettings {
    /// Path to the appcast template.
    ///
    /// Default: "appcast-template.xml"
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// Filename of the stable feed, written only for non-prerelease
    /// versions.
    ///
    /// Default: "appcast.xml"
    #[serde(default = "default_stable_name")]
    pub stable_name: String,

    /// Filename of the beta feed, written for every version.
    ///
    /// Default: "appcast-beta.xml"
    #[serde(default = "default_beta_name")]
    pub beta_name: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            template: default_template(),
            stable_name: default_stable_name(),
            beta_name: default_beta_name(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_dsa_key() -> PathBuf {
    PathBuf::from("sparkle/dsa_priv.pem")
}

fn default_generate_appcast() -> PathBuf {
    PathBuf::from("sparkle/bin/generate_appcast")
}

fn default_template() -> PathBuf {
    PathBuf::from("appcast-template.xml")
}

fn default_stable_name() -> String {
    "appcast.xml".to_string()
}

fn default_beta_name() -> String {
    "appcast-beta.xml".to_string()
}
