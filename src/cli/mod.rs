//! Command line interface for dmgcast.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::appcast::{self, HAS_HDIUTIL, HAS_OPENSSL};
use crate::command::SystemRunner;
use crate::error::Result;
use crate::settings::{ReleaseSettings, SigningBackend};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let out = OutputManager::new(true, false);

    if let Err(reason) = args.validate() {
        out.error(&reason);
        return Ok(1);
    }

    let mut settings = ReleaseSettings::load(&args.config)?;
    if let Some(source) = args.source {
        settings.bundle.source_dir = source;
    }

    if !*HAS_HDIUTIL {
        out.warn("hdiutil not found in PATH; disk-image creation will fail");
    }
    if settings.signing.backend == SigningBackend::Dsa && !*HAS_OPENSSL {
        out.warn("openssl not found in PATH; signature creation will fail");
    }

    let runner = SystemRunner;
    out.progress("Packaging release...");
    let summary = appcast::run(&settings, &runner, &args.output_dir).await?;

    out.info(&format!(
        "📦 {} {} ({}) ≧ macOS {}",
        summary.info.app_name,
        summary.info.version,
        summary.info.build_number,
        summary.info.min_system_version,
    ));
    out.indent(&format!("disk image: {}", summary.dmg_path.display()));
    for feed in &summary.feeds {
        out.indent(&format!("appcast: {}", feed.display()));
    }
    out.success("☕️ Done.");

    Ok(0)
}
