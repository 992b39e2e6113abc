use std::fs;
use std::path::Path;

use color_eyre::eyre::{self, Result, WrapErr};

pub trait Chonk: Sync {
    /// Total size in bytes of every regular file below `dir`.
    ///
    /// Symlinks are not followed and count as zero, same as sockets, fifos
    /// and devices.
    fn get_dir_size(&self, dir: &Path) -> Result<u64>;
}

/// Fails unless `dir` exists and is a directory.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    let meta = fs::metadata(dir).wrap_err_with(|| format!("Failed to read {}", dir.display()))?;
    if !meta.is_dir() {
        return Err(eyre::eyre!("{} is not a directory", dir.display()));
    }
    Ok(())
}
