use std::{fs, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use crate::{
    download::{DownloadOutcome, download_model},
    fetch::ModelFetcher,
    models::ModelKind,
    settings::Settings,
};

#[derive(Debug)]
pub struct ModelReport {
    pub kind: ModelKind,
    pub destination: PathBuf,
    pub outcome: DownloadOutcome,
}

pub fn ensure_base_dirs(settings: &Settings) -> Result<()> {
    for dir in [settings.llm_dir(), settings.embeddings_dir()] {
        fs::create_dir_all(&dir).wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(())
}

/// Pulls `models` one after another. A failed model does not stop the rest.
pub fn run(
    models: &[ModelKind],
    settings: &Settings,
    fetcher: &dyn ModelFetcher,
) -> Result<Vec<ModelReport>> {
    ensure_base_dirs(settings)?;

    let reader = settings.size_method.reader();
    debug!("Measuring downloads with {:?} reader", settings.size_method);

    let reports = models
        .iter()
        .map(|&kind| {
            let spec = kind.spec();
            let destination = spec.destination(settings);
            let outcome = download_model(fetcher, spec, &destination, reader.as_ref());
            ModelReport {
                kind,
                destination,
                outcome,
            }
        })
        .collect();

    Ok(reports)
}
