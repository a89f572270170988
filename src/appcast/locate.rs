//! Application bundle discovery.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Find the .app bundle inside the source folder.
///
/// Takes the first entry whose name ends in `.app`, in directory listing
/// order; exactly one bundle is expected per source folder.
pub fn find_app_bundle(src_dir: &Path) -> Result<PathBuf> {
    for entry in std::fs::read_dir(src_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "app") {
            log::debug!("found application bundle: {}", path.display());
            return Ok(path);
        }
    }

    Err(Error::MissingBundle {
        dir: src_dir.to_path_buf(),
    })
}
