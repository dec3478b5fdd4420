use crate::config::{Config, DEFAULT_API_BASE_URL};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayKind {
    Console,
    Gui,
}

#[derive(Parser, Debug)]
#[command(name = "waste-classifier")]
#[command(
    author,
    version,
    about = "Classify waste photos with a remote model and keep a local history"
)]
pub struct Cli {
    /// Base URL of the classification service
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Front end to run
    #[arg(long, value_enum, default_value_t = DisplayKind::Console)]
    pub display: DisplayKind,

    /// Directory holding the classification history
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Use a random offline classifier instead of the remote service
    #[arg(long)]
    pub fake: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> Config {
        let mut config = Config {
            api_base_url: self.api_url.clone(),
            ..Config::default()
        };
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        config
    }
}
