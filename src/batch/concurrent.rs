//! Concurrent identifier batches.
//!
//! Large lists are split into one contiguous chunk per worker and decoded on
//! tokio's blocking pool. Chunks are joined in order, so the outcome matches
//! what [`BatchDecoder::decode_ids`] returns for the same input.

use super::{BatchDecoder, BatchOutcome, ensure_non_empty};
use crate::error::{DecoderError, Result};
use crate::models::DecodedIdentifier;
use futures::future::try_join_all;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

impl BatchDecoder {
    /// Decode identifiers across the configured worker count.
    ///
    /// Lists shorter than `concurrency_threshold` are decoded inline.
    pub async fn decode_ids_concurrent(
        &self,
        ids: Vec<String>,
    ) -> Result<BatchOutcome<DecodedIdentifier>> {
        ensure_non_empty(ids.len(), "identifier")?;

        let workers = self.config().workers.max(1);
        if ids.len() < self.config().concurrency_threshold || workers == 1 {
            return self.decode_ids(&ids);
        }

        let chunk_size = ids.len().div_ceil(workers);
        debug!(
            "Decoding {} identifiers in chunks of {} on {} workers",
            ids.len(),
            chunk_size,
            workers
        );

        let ids = Arc::new(ids);
        let tasks = (0..ids.len()).step_by(chunk_size).map(|start| {
            let ids = Arc::clone(&ids);
            let batch = self.clone();
            task::spawn_blocking(move || {
                let end = (start + chunk_size).min(ids.len());
                (start..end)
                    .map(|index| batch.decode_id_item(index, &ids[index]))
                    .collect::<Vec<_>>()
            })
        });

        let chunks = try_join_all(tasks)
            .await
            .map_err(|e| DecoderError::ProcessingFailed {
                reason: format!("decode worker did not complete: {}", e),
            })?;

        let outcome: BatchOutcome<_> = chunks.into_iter().flatten().collect();
        info!("Concurrent identifier batch: {}", outcome.summary());
        Ok(outcome)
    }
}
