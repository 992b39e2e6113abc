use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr};
use hf_hub::api::sync::{Api, ApiBuilder};
use tracing::debug;

use crate::settings::HubSettings;

/// Pulls files out of a model hub into a local directory.
///
/// Transfer, resuming, integrity checks and caching are the implementor's
/// business. Callers only see a populated directory or an error.
pub trait ModelFetcher {
    /// Places `filename` from `repo_id` at `local_dir/filename`.
    fn fetch_file(&self, repo_id: &str, filename: &str, local_dir: &Path) -> Result<PathBuf>;

    /// Places every file of `repo_id` under `local_dir` and returns `local_dir`.
    fn snapshot(&self, repo_id: &str, local_dir: &Path) -> Result<PathBuf>;
}

/// [`ModelFetcher`] backed by the Hugging Face Hub's blocking client.
pub struct HubFetcher {
    api: Api,
}

impl HubFetcher {
    /// Starts from the hub's environment (`HF_HOME`, `HF_ENDPOINT`, stored
    /// token), then applies `settings` on top.
    pub fn new(settings: &HubSettings) -> Result<Self> {
        let mut builder = ApiBuilder::from_env().with_progress(settings.progress);
        if let Some(cache_dir) = &settings.cache_dir {
            builder = builder.with_cache_dir(PathBuf::from(cache_dir));
        }
        let api = builder
            .build()
            .wrap_err("Failed to initialize the Hugging Face Hub client")?;

        Ok(Self { api })
    }
}

impl ModelFetcher for HubFetcher {
    fn fetch_file(&self, repo_id: &str, filename: &str, local_dir: &Path) -> Result<PathBuf> {
        let repo = self.api.model(repo_id.to_string());
        let cached = repo
            .get(filename)
            .wrap_err_with(|| format!("Failed to fetch {filename} from {repo_id}"))?;

        materialize(&cached, &local_dir.join(filename))
    }

    fn snapshot(&self, repo_id: &str, local_dir: &Path) -> Result<PathBuf> {
        let repo = self.api.model(repo_id.to_string());
        let info = repo
            .info()
            .wrap_err_with(|| format!("Failed to list files of {repo_id}"))?;

        for sibling in info.siblings {
            debug!("Fetching {}", sibling.rfilename);
            let cached = repo
                .get(&sibling.rfilename)
                .wrap_err_with(|| format!("Failed to fetch {} from {repo_id}", sibling.rfilename))?;
            materialize(&cached, &local_dir.join(&sibling.rfilename))?;
        }

        Ok(local_dir.to_path_buf())
    }
}

/// Makes `target` a real file with the contents of the cached entry.
///
/// Cache entries are usually symlinks into a blob store, so the blob itself
/// gets hard linked, with a plain copy when linking fails (e.g. across
/// filesystems). A `target` that already has the blob's size is kept as is.
pub fn materialize(cached: &Path, target: &Path) -> Result<PathBuf> {
    let blob = fs::canonicalize(cached)
        .wrap_err_with(|| format!("Failed to resolve cached file {}", cached.display()))?;
    let blob_len = fs::metadata(&blob)?.len();

    if let Ok(existing) = fs::symlink_metadata(target) {
        if existing.is_file() && existing.len() == blob_len {
            debug!("{} is up to date", target.display());
            return Ok(target.to_path_buf());
        }
        fs::remove_file(target)
            .wrap_err_with(|| format!("Failed to replace {}", target.display()))?;
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::hard_link(&blob, target).is_err() {
        fs::copy(&blob, target)
            .wrap_err_with(|| format!("Failed to copy {} to {}", blob.display(), target.display()))?;
    }

    Ok(target.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use claims::assert_ok;

    use crate::settings::HubSettings;

    use super::{HubFetcher, materialize};

    #[test]
    fn endpoint_comes_from_environment() -> color_eyre::Result<()> {
        let cache = tempfile::tempdir()?;
        let settings = HubSettings {
            progress: false,
            cache_dir: Some(cache.path().to_string_lossy().into_owned()),
        };

        // SAFETY: no other test reads or writes HF_ENDPOINT
        unsafe { std::env::set_var("HF_ENDPOINT", "https://mirror.example.org") };
        let fetcher = HubFetcher::new(&settings);
        unsafe { std::env::remove_var("HF_ENDPOINT") };

        let url = fetcher?
            .api
            .model("lmsys/vicuna-7b-v1.5".to_string())
            .url("config.json");
        assert_eq!(
            url,
            "https://mirror.example.org/lmsys/vicuna-7b-v1.5/resolve/main/config.json"
        );

        Ok(())
    }

    #[test]
    fn places_file_under_nested_path() -> color_eyre::Result<()> {
        let cache = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        let blob = cache.path().join("blob");
        fs::write(&blob, b"{\"pooling\": true}")?;

        let target = out.path().join("1_Pooling/config.json");
        assert_ok!(materialize(&blob, &target));
        assert_eq!(fs::read(&target)?, b"{\"pooling\": true}");

        Ok(())
    }

    #[test]
    fn replaces_stale_file() -> color_eyre::Result<()> {
        let cache = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        let blob = cache.path().join("blob");
        fs::write(&blob, b"fresh weights")?;
        let target = out.path().join("model.bin");
        fs::write(&target, b"old")?;

        materialize(&blob, &target)?;
        assert_eq!(fs::read(&target)?, b"fresh weights");

        Ok(())
    }

    #[test]
    fn keeps_file_of_matching_size() -> color_eyre::Result<()> {
        let cache = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        let blob = cache.path().join("blob");
        fs::write(&blob, b"abc")?;
        let target = out.path().join("tokenizer.model");
        fs::write(&target, b"xyz")?;

        materialize(&blob, &target)?;
        assert_eq!(fs::read(&target)?, b"xyz");

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn resolves_cache_symlinks() -> color_eyre::Result<()> {
        let cache = tempfile::tempdir()?;
        let out = tempfile::tempdir()?;
        fs::create_dir_all(cache.path().join("blobs"))?;
        fs::create_dir_all(cache.path().join("snapshots/main"))?;
        fs::write(cache.path().join("blobs/abc123"), b"shard")?;
        let link = cache.path().join("snapshots/main/pytorch_model.bin");
        std::os::unix::fs::symlink("../../blobs/abc123", &link)?;

        let target = out.path().join("pytorch_model.bin");
        materialize(&link, &target)?;

        assert!(fs::symlink_metadata(&target)?.is_file());
        assert_eq!(fs::read(&target)?, b"shard");

        Ok(())
    }
}
