use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use dirs::config_dir;
use serde::Deserialize;

use crate::dir_size::{Chonk, IterativeReader, ParallelReader, RecursiveReader};

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub llm_dir: String,
    pub embeddings_dir: String,
    pub size_method: SizeMethod,
    pub hub: HubSettings,
}

#[derive(Debug, Deserialize)]
pub struct HubSettings {
    /// Show the hub client's own progress bars
    pub progress: bool,
    pub cache_dir: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMethod {
    Recursive,
    Iterative,
    Parallel,
}

impl SizeMethod {
    pub fn reader(&self) -> Box<dyn Chonk> {
        match self {
            SizeMethod::Recursive => Box::new(RecursiveReader),
            SizeMethod::Iterative => Box::new(IterativeReader),
            SizeMethod::Parallel => Box::new(ParallelReader),
        }
    }
}

impl Settings {
    pub fn normalize_paths(mut self) -> Self {
        self.llm_dir = shellexpand::tilde(&self.llm_dir).into_owned();
        self.embeddings_dir = shellexpand::tilde(&self.embeddings_dir).into_owned();
        if let Some(cache_dir) = &self.hub.cache_dir {
            self.hub.cache_dir = Some(shellexpand::tilde(cache_dir).into_owned());
        }
        self
    }

    pub fn llm_dir(&self) -> PathBuf {
        PathBuf::from(&self.llm_dir)
    }

    pub fn embeddings_dir(&self) -> PathBuf {
        PathBuf::from(&self.embeddings_dir)
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("model_pull").join("config.yaml"))
}

pub fn get_config() -> Result<Settings, ConfigError> {
    load_settings(config_file().as_deref())
}

/// Defaults, then `config_file` if it exists, then `MODEL_PULL_*` variables.
pub fn load_settings(config_file: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = Config::builder()
        .set_default("llm_dir", "LLM/vicuna")?
        .set_default("embeddings_dir", "SentenceTransformers")?
        .set_default("size_method", "recursive")?
        .set_default("hub.progress", false)?
        .set_default("hub.cache_dir", Option::<String>::None)?;

    if let Some(file) = config_file {
        settings = settings.add_source(config::File::from(file).required(false));
    }

    let settings = settings
        .add_source(
            Environment::with_prefix("MODEL_PULL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?.normalize_paths())
}
