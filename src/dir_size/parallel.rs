use color_eyre::eyre::{Result, WrapErr};
use rayon::prelude::*;
use std::{
    fs::{self, DirEntry},
    path::Path,
};

use super::chonk::{Chonk, ensure_dir};

pub struct ParallelReader;

impl ParallelReader {
    fn walk(&self, dir: &Path) -> Result<u64> {
        let entries: Vec<DirEntry> = fs::read_dir(dir)
            .wrap_err_with(|| format!("Failed to list {}", dir.display()))?
            .collect::<Result<_, _>>()?;

        entries
            .par_iter()
            .map(|entry| -> Result<u64> {
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    self.walk(&entry.path())
                } else if file_type.is_file() {
                    Ok(entry.metadata()?.len())
                } else {
                    Ok(0)
                }
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))
    }
}

impl Chonk for ParallelReader {
    fn get_dir_size(&self, dir: &Path) -> Result<u64> {
        ensure_dir(dir)?;
        self.walk(dir)
    }
}
