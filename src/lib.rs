pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    coordinator::PairCoordinator, etl::EtlEngine, pairing::ChunkShuffler,
    pipeline::PairingPipeline,
};
pub use domain::model::{Pair, PairingResult, Record, SanitizedDataset};
pub use utils::error::{PairingError, Result};
