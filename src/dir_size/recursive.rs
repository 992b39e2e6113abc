use super::chonk::{Chonk, ensure_dir};

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

pub struct RecursiveReader;

impl RecursiveReader {
    fn walk(&self, dir: &Path) -> Result<u64> {
        let mut size = 0;
        let entries =
            fs::read_dir(dir).wrap_err_with(|| format!("Failed to list {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                size += self.walk(&entry.path())?;
            } else if file_type.is_file() {
                size += entry.metadata()?.len();
            }
        }
        Ok(size)
    }
}

impl Chonk for RecursiveReader {
    fn get_dir_size(&self, dir: &Path) -> Result<u64> {
        ensure_dir(dir)?;
        self.walk(dir)
    }
}

#[cfg(test)]
mod tests {
    use claims::assert_err;

    use crate::dir_size::{chonk::Chonk, fixtures};

    use super::RecursiveReader;

    #[test]
    fn test_recursive_dir_size() -> color_eyre::Result<()> {
        let tree = fixtures::basic_tree()?;
        let size = RecursiveReader.get_dir_size(tree.path())?;
        assert_eq!(size, fixtures::BASIC_TREE_SIZE);

        Ok(())
    }

    #[test]
    fn empty_dir_is_zero() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        assert_eq!(RecursiveReader.get_dir_size(dir.path())?, 0);

        Ok(())
    }

    #[test]
    fn missing_dir_errors() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        assert_err!(RecursiveReader.get_dir_size(&dir.path().join("nope")));

        Ok(())
    }

    #[test]
    fn file_instead_of_dir_errors() -> color_eyre::Result<()> {
        let tree = fixtures::basic_tree()?;
        assert_err!(RecursiveReader.get_dir_size(&tree.path().join("a.txt")));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() -> color_eyre::Result<()> {
        let tree = fixtures::tree_with_symlinks()?;
        let size = RecursiveReader.get_dir_size(tree.path())?;
        assert_eq!(size, fixtures::BASIC_TREE_SIZE);

        Ok(())
    }
}
