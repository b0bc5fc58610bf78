pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, ErrorPolicy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "dwarf-giant")]
#[command(about = "Pair every record with a random dwarf and giant")]
pub struct CliConfig {
    #[arg(long, default_value = "data.json", help = "JSON array of records to pair")]
    pub data_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', help = "Files to write: json, csv")]
    pub output_formats: Vec<String>,

    #[arg(long, help = "Pair all records as one cycle on a single worker")]
    pub sequential: bool,

    #[arg(long, help = "Worker count (defaults to the number of cores)")]
    pub workers: Option<usize>,

    #[arg(long, help = "Seed for a reproducible shuffle")]
    pub seed: Option<u64>,

    #[arg(long, help = "Fail on unreadable or malformed input instead of pairing nothing")]
    pub strict: bool,

    #[arg(long, help = "Print the pairs as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn concurrent(&self) -> bool {
        !self.sequential
    }

    fn workers(&self) -> Option<usize> {
        self.workers
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn error_policy(&self) -> ErrorPolicy {
        if self.strict {
            ErrorPolicy::Fail
        } else {
            ErrorPolicy::Degrade
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_path", &self.data_path)?;
        if !self.output_formats.is_empty() {
            validation::validate_path("output_path", &self.output_path)?;
        }
        validation::validate_output_formats("output_formats", &self.output_formats)?;
        if let Some(workers) = self.workers {
            validation::validate_positive_number("workers", workers, 1)?;
        }
        Ok(())
    }
}
