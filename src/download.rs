use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Report, Result, WrapErr};
use tracing::{error, info};

use crate::{
    dir_size::Chonk,
    fetch::ModelFetcher,
    models::{FetchPlan, ModelSpec},
    units::format_size,
};

#[derive(Debug)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, size: u64 },
    Failed { error: Report },
}

impl DownloadOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded { .. })
    }
}

/// Runs the fetch plan of `spec` into `dest` and measures the result.
///
/// Never returns an error: whatever goes wrong is logged and reported as
/// [`DownloadOutcome::Failed`]. Nothing is retried.
pub fn download_model(
    fetcher: &dyn ModelFetcher,
    spec: &ModelSpec,
    dest: &Path,
    reader: &dyn Chonk,
) -> DownloadOutcome {
    match &spec.plan {
        FetchPlan::Snapshot => info!("Starting download of {} model...", spec.label),
        FetchPlan::Files { .. } => info!("Starting download of {} model files...", spec.label),
    }

    match try_download(fetcher, spec, dest, reader) {
        Ok((path, size)) => {
            info!("{} model successfully downloaded to: {}", spec.name, path.display());
            info!("Model size: {}", format_size(size));
            DownloadOutcome::Downloaded { path, size }
        }
        Err(err) => {
            error!("Error downloading {} model: {err:#}", spec.name);
            DownloadOutcome::Failed { error: err }
        }
    }
}

fn try_download(
    fetcher: &dyn ModelFetcher,
    spec: &ModelSpec,
    dest: &Path,
    reader: &dyn Chonk,
) -> Result<(PathBuf, u64)> {
    fs::create_dir_all(dest).wrap_err_with(|| format!("Failed to create {}", dest.display()))?;

    let local_dir = match &spec.plan {
        FetchPlan::Snapshot => fetcher.snapshot(spec.repo_id, dest)?,
        FetchPlan::Files { .. } => {
            for file in spec.plan.files() {
                if file.is_shard {
                    info!(
                        "Downloading model shard {} (this may take a while)...",
                        file.name
                    );
                } else {
                    info!("Downloading {}...", file.name);
                }
                fetcher.fetch_file(spec.repo_id, &file.name, dest)?;
            }
            dest.to_path_buf()
        }
    };

    let size = reader.get_dir_size(&local_dir)?;
    let path = std::path::absolute(&local_dir)?;

    Ok((path, size))
}
