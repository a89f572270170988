//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Release packager for macOS applications
#[derive(Parser, Debug)]
#[command(
    name = "dmgcast",
    version,
    about = "Archive a built .app to a signed DMG and render the Sparkle appcast",
    long_about = "Archives the built .app bundle found in the source folder into a \
compressed DMG disk image, code signs it, creates the Sparkle signature, and \
renders the appcast feed files.

The stable feed (appcast.xml) is written only for stable versions; a version \
string containing a lowercase letter (e.g. 4.2.0b1) goes to the beta feed only.

Usage:
  dmgcast
  dmgcast path/to/build --output-dir dist"
)]
pub struct Args {
    /// Source folder containing the built .app bundle (overrides the
    /// settings file)
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// Path to the settings file
    #[arg(short, long, value_name = "PATH", default_value = "appcast.toml")]
    pub config: PathBuf,

    /// Directory receiving the disk image and the feed files
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub output_dir: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(source) = &self.source {
            if !source.is_dir() {
                return Err(format!("source folder does not exist: {}", source.display()));
            }
        }
        Ok(())
    }
}
