use std::{fmt, path::PathBuf};

use clap::ValueEnum;

use crate::settings::Settings;

/// Models this tool knows how to pull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    Vicuna,
    Minilm,
}

impl ModelKind {
    /// Download order when no model is picked.
    pub const ALL: [ModelKind; 2] = [ModelKind::Vicuna, ModelKind::Minilm];

    pub fn spec(&self) -> &'static ModelSpec {
        match self {
            ModelKind::Vicuna => &VICUNA,
            ModelKind::Minilm => &MINILM,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseDir {
    Llm,
    Embeddings,
}

#[derive(Debug, PartialEq, Eq)]
pub enum FetchPlan {
    /// Every file in the repository.
    Snapshot,
    /// Listed files, then `shards` weight shards.
    Files {
        files: &'static [&'static str],
        shards: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub name: String,
    pub is_shard: bool,
}

impl FetchPlan {
    /// Files to fetch in order. Empty for snapshots, the hub decides those.
    pub fn files(&self) -> Vec<PlannedFile> {
        match self {
            FetchPlan::Snapshot => Vec::new(),
            FetchPlan::Files { files, shards } => files
                .iter()
                .map(|name| PlannedFile {
                    name: (*name).to_string(),
                    is_shard: false,
                })
                .chain((1..=*shards).map(|i| PlannedFile {
                    name: shard_name(i, *shards),
                    is_shard: true,
                }))
                .collect(),
        }
    }
}

pub fn shard_name(index: u32, total: u32) -> String {
    format!("pytorch_model-{index:05}-of-{total:05}.bin")
}

#[derive(Debug)]
pub struct ModelSpec {
    /// Short name used in log lines and the summary table
    pub name: &'static str,
    /// Full release name
    pub label: &'static str,
    pub repo_id: &'static str,
    pub dir_name: &'static str,
    pub base: BaseDir,
    pub plan: FetchPlan,
}

impl ModelSpec {
    pub fn destination(&self, settings: &Settings) -> PathBuf {
        let base = match self.base {
            BaseDir::Llm => settings.llm_dir(),
            BaseDir::Embeddings => settings.embeddings_dir(),
        };
        base.join(self.dir_name)
    }
}

const VICUNA_FILES: &[&str] = &[
    "config.json",
    "generation_config.json",
    "pytorch_model.bin.index.json",
    "special_tokens_map.json",
    "tokenizer.model",
    "tokenizer_config.json",
];

static VICUNA: ModelSpec = ModelSpec {
    name: "Vicuna",
    label: "Vicuna-7b-v1.5",
    repo_id: "lmsys/vicuna-7b-v1.5",
    dir_name: "vicuna-7b-v1.5",
    base: BaseDir::Llm,
    plan: FetchPlan::Files {
        files: VICUNA_FILES,
        shards: 2,
    },
};

static MINILM: ModelSpec = ModelSpec {
    name: "MiniLM",
    label: "all-MiniLM-L6-v2",
    repo_id: "sentence-transformers/all-MiniLM-L6-v2",
    dir_name: "all-MiniLM-L6-v2",
    base: BaseDir::Embeddings,
    plan: FetchPlan::Snapshot,
};
