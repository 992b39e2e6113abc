use super::chonk::{Chonk, ensure_dir};

use std::path::Path;

use color_eyre::eyre::Result;
use walkdir::WalkDir;

/// Lets `walkdir` do the traversal, without following links.
pub struct IterativeReader;

impl Chonk for IterativeReader {
    fn get_dir_size(&self, dir: &Path) -> Result<u64> {
        ensure_dir(dir)?;

        let mut size = 0;
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() {
                size += entry.metadata()?.len();
            }
        }
        Ok(size)
    }
}
