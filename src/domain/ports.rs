use crate::domain::model::PairingResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// What to do when the data source or the record format is broken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log a diagnostic and carry on with an empty dataset.
    #[default]
    Degrade,
    Fail,
}

pub trait ConfigProvider: Send + Sync {
    fn data_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn concurrent(&self) -> bool;
    /// `None` means one worker per available core.
    fn workers(&self) -> Option<usize>;
    fn seed(&self) -> Option<u64>;
    fn error_policy(&self) -> ErrorPolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<serde_json::Value>>;
    async fn transform(&self, data: Vec<serde_json::Value>) -> Result<PairingResult>;
    async fn load(&self, result: &PairingResult) -> Result<String>;
}
