//! Sparkle signature generation.
//!
//! Two backends: signing the disk image directly with the project's DSA key
//! via openssl, or delegating signing and feed generation to an external
//! `generate_appcast` executable.

use crate::command::{CommandRunner, CommandSpec};
use crate::error::Result;
use base64::Engine;
use sha1::{Digest, Sha1};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Create the base64 DSA signature for the Sparkle framework.
///
/// The disk image is streamed through a SHA-1 digest; the binary digest is
/// signed with `openssl dgst -dss1 -sign <key>` and the raw signature
/// base64-encoded. Equivalent to the classic
/// `openssl dgst -sha1 -binary | openssl dgst -dss1 -sign | openssl enc -base64`
/// pipeline, except that a failure in any stage is an explicit error instead
/// of an empty string.
pub async fn dsa_signature<R: CommandRunner>(
    runner: &R,
    dmg_path: &Path,
    key_path: &Path,
) -> Result<String> {
    let digest = sha1_digest(dmg_path).await?;

    let key = key_path.display().to_string();
    let output = runner
        .run(
            CommandSpec::new("openssl")
                .args(["dgst", "-dss1", "-sign", key.as_str()])
                .stdin(digest),
        )
        .await?
        .ensure_success("openssl")?;

    Ok(base64::engine::general_purpose::STANDARD.encode(&output.stdout))
}

/// Delegate signing and appcast generation to the external generator.
///
/// The executable scans the archive directory and writes the signed feed
/// itself; only its exit status is consumed here.
pub async fn delegate_generate_appcast<R: CommandRunner>(
    runner: &R,
    tool: &Path,
    archive_dir: &Path,
) -> Result<()> {
    let program = tool.display().to_string();
    let dir = archive_dir.display().to_string();

    runner
        .run(CommandSpec::new(program.as_str()).args([dir.as_str()]))
        .await?
        .ensure_success(&program)?;

    Ok(())
}

/// SHA-1 digest of a file, read in 8 KiB chunks.
async fn sha1_digest(path: &Path) -> Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha1::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hasher.finalize().to_vec())
}
