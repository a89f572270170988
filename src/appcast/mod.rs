//! The release pipeline: locate, read, archive, sign, render.
//!
//! Fully sequential; each external tool runs to completion before the next
//! step starts, and the first failure aborts the run. Nothing written so
//! far is rolled back.

mod dmg;
mod feed;
mod locate;
mod manifest;
mod release;
mod sign;

pub use dmg::{codesign_dmg, create_dmg, dmg_file_name};
pub use feed::{publication_date, render, write_feeds};
pub use locate::find_app_bundle;
pub use manifest::{AppManifest, read_manifest};
pub use release::{ReleaseInfo, is_prerelease};
pub use sign::{delegate_generate_appcast, dsa_signature};

use crate::command::CommandRunner;
use crate::error::Result;
use crate::settings::{ReleaseSettings, SigningBackend};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Whether hdiutil is on PATH. Probed once; absence is only a warning
/// because the spawn error surfaces anyway when the tool is needed.
pub static HAS_HDIUTIL: LazyLock<bool> = LazyLock::new(|| which::which("hdiutil").is_ok());

/// Whether openssl is on PATH.
pub static HAS_OPENSSL: LazyLock<bool> = LazyLock::new(|| which::which("openssl").is_ok());

/// What a completed run produced.
#[derive(Debug)]
pub struct Summary {
    /// The release record, including the signature when the dsa backend ran
    pub info: ReleaseInfo,

    /// Path of the created disk image
    pub dmg_path: PathBuf,

    /// Feed files written by the renderer; empty when generation was
    /// delegated to the external tool
    pub feeds: Vec<PathBuf>,
}

/// Run the whole pipeline against the source folder.
pub async fn run<R: CommandRunner>(
    settings: &ReleaseSettings,
    runner: &R,
    output_dir: &Path,
) -> Result<Summary> {
    let src_dir = &settings.bundle.source_dir;

    // Locate the bundle and read its manifest before touching the disk, so
    // a missing bundle produces no output files at all.
    let app_bundle = find_app_bundle(src_dir)?;
    let manifest = read_manifest(&app_bundle)?;

    let prefix = settings
        .bundle
        .dmg_prefix
        .clone()
        .unwrap_or_else(|| format!("{}_", manifest.app_name));
    let dmg_name = dmg_file_name(&prefix, &manifest.version);
    let dmg_path = output_dir.join(&dmg_name);

    create_dmg(runner, src_dir, &dmg_path).await?;

    if let Some(identity) = &settings.codesign.identity {
        codesign_dmg(runner, identity, &dmg_path).await?;
    } else {
        log::debug!("no codesign identity configured, skipping");
    }

    let dmg_size = tokio::fs::metadata(&dmg_path).await?.len();
    let mut info = ReleaseInfo::new(manifest, dmg_name, dmg_size);

    let feeds = match settings.signing.backend {
        SigningBackend::Dsa => {
            let signature = dsa_signature(runner, &dmg_path, &settings.signing.dsa_key).await?;
            info.signature = Some(signature);

            let template = std::fs::read_to_string(&settings.feed.template)?;
            let rendered = render(&template, &info, &publication_date())?;
            write_feeds(
                output_dir,
                &settings.feed.stable_name,
                &settings.feed.beta_name,
                &rendered,
                info.prerelease,
            )?
        }
        SigningBackend::GenerateAppcast => {
            // The external generator signs the archive and owns the feed
            // files; the built-in renderer stays out of its way.
            delegate_generate_appcast(runner, &settings.signing.generate_appcast, output_dir)
                .await?;
            Vec::new()
        }
    };

    Ok(Summary {
        info,
        dmg_path,
        feeds,
    })
}
