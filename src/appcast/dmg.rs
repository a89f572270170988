//! Disk-image creation and code signing via hdiutil and codesign.
//!
//! The image is created in UDBZ (compressed) format on an HFS+ filesystem;
//! HFS+ keeps the image mountable on systems older than High Sierra, where
//! APFS first appeared.

use crate::command::{CommandRunner, CommandSpec};
use crate::error::Result;
use std::path::Path;

/// Disk-image filename: the literal prefix concatenated with the version
/// string.
///
/// Examples:
/// - `MyApp_4.2.0.dmg`
/// - `CotEditor_4.2.0b1.dmg`
pub fn dmg_file_name(prefix: &str, version: &str) -> String {
    format!("{}{}.dmg", prefix, version)
}

/// Archive the source folder into a compressed disk image.
///
/// Runs `hdiutil create -format UDBZ -fs HFS+ -srcfolder <src> <dmg>` and
/// fails on a non-zero exit, carrying hdiutil's stderr.
pub async fn create_dmg<R: CommandRunner>(
    runner: &R,
    src_dir: &Path,
    dmg_path: &Path,
) -> Result<()> {
    log::info!("creating disk image: {}", dmg_path.display());

    let src = src_dir.display().to_string();
    let dmg = dmg_path.display().to_string();
    runner
        .run(CommandSpec::new("hdiutil").args([
            "create",
            "-format",
            "UDBZ",
            "-fs",
            "HFS+",
            "-srcfolder",
            src.as_str(),
            dmg.as_str(),
        ]))
        .await?
        .ensure_success("hdiutil")?;

    Ok(())
}

/// Code-sign the disk image with the given identity.
///
/// Runs `codesign --force --sign <identity> <dmg>`. A signing failure is
/// fatal like any other external-command failure.
pub async fn codesign_dmg<R: CommandRunner>(
    runner: &R,
    identity: &str,
    dmg_path: &Path,
) -> Result<()> {
    log::info!("code signing with identity: {}", identity);

    let dmg = dmg_path.display().to_string();
    runner
        .run(CommandSpec::new("codesign").args(["--force", "--sign", identity, dmg.as_str()]))
        .await?
        .ensure_success("codesign")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::ScriptedRunner;
    use crate::error::Error;

    #[test]
    fn dmg_name_is_prefix_plus_version() {
        assert_eq!(dmg_file_name("MyApp_", "4.2.0"), "MyApp_4.2.0.dmg");
        assert_eq!(dmg_file_name("CotEditor_", "4.2.0b1"), "CotEditor_4.2.0b1.dmg");
    }

    #[tokio::test]
    async fn create_dmg_passes_fixed_hdiutil_flags() {
        let runner = ScriptedRunner::new();
        runner.push_success(b"created: out.dmg\n");

        create_dmg(&runner, Path::new("build"), Path::new("MyApp_4.2.0.dmg"))
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "hdiutil");
        assert_eq!(
            calls[0].args,
            vec![
                "create",
                "-format",
                "UDBZ",
                "-fs",
                "HFS+",
                "-srcfolder",
                "build",
                "MyApp_4.2.0.dmg",
            ]
        );
    }

    #[tokio::test]
    async fn hdiutil_failure_is_fatal() {
        let runner = ScriptedRunner::new();
        runner.push_failure(1, "hdiutil: create failed - Resource busy");

        let err = create_dmg(&runner, Path::new("build"), Path::new("out.dmg"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
        assert!(err.to_string().contains("Resource busy"));
    }

    #[tokio::test]
    async fn codesign_runs_with_force_and_identity() {
        let runner = ScriptedRunner::new();
        runner.push_success(b"");

        codesign_dmg(&runner, "Developer ID Application: Jane Doe", Path::new("out.dmg"))
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, "codesign");
        assert_eq!(
            calls[0].args,
            vec![
                "--force",
                "--sign",
                "Developer ID Application: Jane Doe",
                "out.dmg",
            ]
        );
    }

    #[tokio::test]
    async fn codesign_failure_is_no_longer_silent() {
        let runner = ScriptedRunner::new();
        runner.push_failure(1, "errSecInternalComponent");

        let err = codesign_dmg(&runner, "Developer ID Application", Path::new("out.dmg"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("codesign"));
    }
}
