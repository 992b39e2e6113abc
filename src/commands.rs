use clap::Parser;

use crate::models::ModelKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Specify which model to download
    #[arg(long, value_enum)]
    pub model: Option<ModelKind>,
}

impl Cli {
    /// Models to pull, in order. No choice means all of them.
    pub fn selected_models(&self) -> Vec<ModelKind> {
        match self.model {
            Some(kind) => vec![kind],
            None => ModelKind::ALL.to_vec(),
        }
    }
}
