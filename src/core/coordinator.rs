use crate::core::pairing::{pair_chunk, ChunkShuffler};
use crate::core::splitter;
use crate::domain::model::{Pair, SanitizedDataset};
use crate::utils::error::{PairingError, Result};

/// Fans a dataset out over blocking worker tasks, one chunk per worker.
///
/// In concurrent mode every chunk is paired as its own cycle; names are never
/// paired across chunk boundaries. Sequential mode pairs the whole dataset as
/// one cycle.
#[derive(Debug, Clone)]
pub struct PairCoordinator {
    workers: usize,
}

impl PairCoordinator {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(PairingError::InvalidArgument {
                name: "workers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(Self { workers })
    }

    /// One worker per logical core.
    pub fn from_host() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of chunks a dataset of `len` records is paired in.
    pub fn chunk_count(&self, len: usize, concurrent: bool) -> usize {
        match (len, concurrent) {
            (0, _) => 0,
            (_, false) => 1,
            (len, true) => self.workers.min(len),
        }
    }

    pub async fn create_pairs<S>(
        &self,
        dataset: SanitizedDataset,
        concurrent: bool,
        shuffler: &mut S,
    ) -> Result<Vec<Pair>>
    where
        S: ChunkShuffler + 'static,
    {
        if !concurrent {
            let mut records = dataset.into_records();
            tracing::debug!("Pairing {} records as a single cycle", records.len());
            return pair_chunk(&mut records, shuffler);
        }

        let chunks = splitter::split(dataset.into_records(), self.workers)?;
        tracing::debug!(
            "Pairing {} chunks across {} workers",
            chunks.len(),
            self.workers
        );

        let handles: Vec<_> = chunks
            .into_iter()
            .enumerate()
            .map(|(index, mut chunk)| {
                let mut worker_shuffler = shuffler.for_worker();
                tokio::task::spawn_blocking(move || {
                    tracing::trace!("Worker {} pairing {} records", index, chunk.len());
                    pair_chunk(&mut chunk, &mut worker_shuffler)
                })
            })
            .collect();

        // Await in submission order so output order does not depend on timing.
        let mut pairs = Vec::new();
        for (index, handle) in handles.into_iter().enumerate() {
            let chunk_pairs = handle.await.map_err(|e| PairingError::WorkerError {
                message: format!("chunk {}: {}", index, e),
            })??;
            pairs.extend(chunk_pairs);
        }

        Ok(pairs)
    }
}

impl Default for PairCoordinator {
    fn default() -> Self {
        Self::from_host()
    }
}
