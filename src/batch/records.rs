//! Record enrichment: attach decoded identifier fields to ingested records.

use super::{BatchDecoder, BatchOutcome, ItemOutcome, NO_IDENTIFIER_FOUND, ensure_non_empty, miss};
use crate::constants::ID_LENGTH;
use crate::error::Result;
use crate::extract::extract_id;
use crate::models::{DataRecord, EnrichedRecord};
use tracing::{debug, info};

/// Pick the identifier a record refers to.
///
/// An explicit `disaster_id` of exactly 36 characters wins, then the first
/// identifier embedded in `content`, then a 36-character `record_id`.
/// Only the length is checked here; validation happens on decode.
pub fn resolve_record_identifier(record: &DataRecord) -> Option<String> {
    let exact = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| v.chars().count() == ID_LENGTH)
            .map(str::to_string)
    };

    exact(&record.disaster_id)
        .or_else(|| {
            record
                .content
                .as_deref()
                .and_then(extract_id)
                .map(str::to_string)
        })
        .or_else(|| exact(&record.record_id))
}

fn record_label(record: &DataRecord, index: usize) -> String {
    record
        .record_id
        .clone()
        .or_else(|| record.disaster_id.clone())
        .unwrap_or_else(|| format!("record #{}", index + 1))
}

impl BatchDecoder {
    /// Enrich a single record
    pub fn process_record(&self, index: usize, record: DataRecord) -> ItemOutcome<EnrichedRecord> {
        let pending = ItemOutcome::pending(index, record_label(&record, index));
        match resolve_record_identifier(&record) {
            Some(id) => {
                debug!("Record {} resolved to identifier {}", pending.input, id);
                self.decode_into(pending, &id, |decoded| EnrichedRecord::new(record, &decoded))
            }
            None => miss(pending, NO_IDENTIFIER_FOUND),
        }
    }

    pub fn process_records(&self, records: Vec<DataRecord>) -> Result<BatchOutcome<EnrichedRecord>> {
        ensure_non_empty(records.len(), "record")?;

        let outcome: BatchOutcome<_> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.process_record(index, record))
            .collect();

        info!("Record batch: {}", outcome.summary());
        Ok(outcome)
    }

    /// Enrich records paired with an identifier string supplied alongside them.
    ///
    /// The paired string may carry the identifier inside other text.
    pub fn process_record_pairs(
        &self,
        pairs: Vec<(DataRecord, String)>,
    ) -> Result<BatchOutcome<EnrichedRecord>> {
        ensure_non_empty(pairs.len(), "record")?;

        let outcome: BatchOutcome<_> = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (record, id_text))| {
                let pending = ItemOutcome::pending(index, id_text.as_str());
                match extract_id(&id_text) {
                    Some(id) => {
                        self.decode_into(pending, id, |decoded| EnrichedRecord::new(record, &decoded))
                    }
                    None => miss(pending, NO_IDENTIFIER_FOUND),
                }
            })
            .collect();

        info!("Record-pair batch: {}", outcome.summary());
        Ok(outcome)
    }
}
