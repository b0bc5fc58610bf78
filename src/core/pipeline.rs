use crate::core::coordinator::PairCoordinator;
use crate::core::dedup;
use crate::core::{ConfigProvider, ErrorPolicy, PairingResult, Pipeline, Storage};
use crate::utils::error::{PairingError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tokio::sync::Mutex;

pub const JSON_OUTPUT_FILE: &str = "pairs.json";
pub const CSV_OUTPUT_FILE: &str = "pairs.csv";

/// Reads records from a JSON file, dedups them and pairs them.
pub struct PairingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    coordinator: PairCoordinator,
    rng: Mutex<StdRng>,
}

impl<S: Storage, C: ConfigProvider> PairingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let coordinator = match config.workers() {
            Some(workers) => PairCoordinator::new(workers)?,
            None => PairCoordinator::from_host(),
        };

        let rng = match config.seed() {
            Some(seed) => {
                tracing::debug!("Using fixed shuffle seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            storage,
            config,
            coordinator,
            rng: Mutex::new(rng),
        })
    }

    pub fn coordinator(&self) -> &PairCoordinator {
        &self.coordinator
    }

    async fn read_records(&self, path: &str) -> Result<Vec<serde_json::Value>> {
        let bytes = self
            .storage
            .read_file(path)
            .await
            .map_err(|e| PairingError::DataSourceError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let document: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| PairingError::DataSourceError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        match document {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(PairingError::DataFormatError {
                message: format!("expected a JSON array of records, got {}", json_kind(&other)),
            }),
        }
    }

    fn recover<T: Default>(&self, stage: &str, result: Result<T>) -> Result<T> {
        match (result, self.config.error_policy()) {
            (Ok(value), _) => Ok(value),
            (Err(e), ErrorPolicy::Degrade) => {
                tracing::warn!("⚠️ {} failed, continuing with no records: {}", stage, e);
                Ok(T::default())
            }
            (Err(e), ErrorPolicy::Fail) => Err(e),
        }
    }

    fn render_csv(result: &PairingResult) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["dwarf", "giant"])?;
        for pair in &result.pairs {
            writer.write_record([pair.dwarf.as_str(), pair.giant.as_str()])?;
        }
        writer
            .into_inner()
            .map_err(|e| PairingError::IoError(e.into_error()))
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PairingPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<serde_json::Value>> {
        let path = self.config.data_path();
        tracing::debug!("Reading records from: {}", path);

        let records = self.read_records(path).await;
        self.recover("Reading the data source", records)
    }

    async fn transform(&self, data: Vec<serde_json::Value>) -> Result<PairingResult> {
        let dataset = self.recover("Deduplicating records", dedup::sanitize(data))?;

        let concurrent = self.config.concurrent();
        let chunk_count = self.coordinator.chunk_count(dataset.len(), concurrent);
        let sanitized_records = dataset.len();
        tracing::debug!(
            "Pairing {} unique records in {} chunk(s), concurrent: {}",
            sanitized_records,
            chunk_count,
            concurrent
        );

        let mut rng = self.rng.lock().await;
        let pairs = self
            .coordinator
            .create_pairs(dataset, concurrent, &mut *rng)
            .await?;

        Ok(PairingResult {
            sanitized_records,
            chunk_count,
            pairs,
        })
    }

    async fn load(&self, result: &PairingResult) -> Result<String> {
        let formats = self.config.output_formats();
        if formats.is_empty() {
            return Ok("stdout".to_string());
        }

        let output_dir = Path::new(self.config.output_path());
        for format in formats {
            let (file_name, data) = match format.as_str() {
                "json" => (JSON_OUTPUT_FILE, serde_json::to_vec_pretty(&result.pairs)?),
                "csv" => (CSV_OUTPUT_FILE, Self::render_csv(result)?),
                other => {
                    return Err(PairingError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format. Valid formats: json, csv".to_string(),
                    })
                }
            };

            let path = output_dir.join(file_name);
            let path = path.to_string_lossy();
            tracing::debug!("Writing {} ({} bytes)", path, data.len());
            self.storage.write_file(&path, &data).await?;
        }

        Ok(self.config.output_path().to_string())
    }
}
