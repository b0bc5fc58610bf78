use crate::core::{PairingResult, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        let (output, _) = self.run_with_result().await?;
        Ok(output)
    }

    /// Runs all three stages and hands back the pairs alongside the load
    /// location, so callers can present them.
    pub async fn run_with_result(&self) -> Result<(String, PairingResult)> {
        tracing::info!("Starting pairing run...");
        self.monitor.log_stats("Start");

        // Extract
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!(
            "Paired {} unique records into {} pairs ({} chunk(s))",
            result.sanitized_records,
            result.pairs.len(),
            result.chunk_count
        );
        self.monitor.log_stats("Transform");

        // Load
        let output = self.pipeline.load(&result).await?;
        tracing::info!("Output written to: {}", output);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok((output, result))
    }
}
