//! Batch orchestration over identifier lists, free text, file names,
//! data records and sheet rows.
//!
//! Every batch operation applies the single-item pipeline to each input and
//! collects a [`BatchOutcome`]. A malformed item becomes a failure record in
//! place; it never aborts its siblings. The only batch-level error is an
//! empty input list.
//!
//! # Item lifecycle
//!
//! ```text
//! Pending ──> Extracted ──> Decoded
//!    │            └───────> DecodeFailed
//!    └──────> ExtractionFailed
//! ```
//!
//! Failure states are terminal and are never retried.
//!
//! # Example
//!
//! ```rust
//! use disaster_decoder::batch::BatchDecoder;
//!
//! let batch = BatchDecoder::default();
//! let outcome = batch
//!     .decode_ids(&["110105000000202401151030000011301001", "12345"])
//!     .unwrap();
//!
//! assert_eq!(outcome.total, 2);
//! assert_eq!(outcome.succeeded, 1);
//! assert_eq!(outcome.failed, 1);
//! ```

pub mod concurrent;
pub mod records;
pub mod sheet;

#[cfg(test)]
pub mod tests;

pub use records::resolve_record_identifier;
pub use sheet::{Sheet, SheetOptions, SheetReport, SheetRow};

use crate::codes::Language;
use crate::config::DecoderConfig;
use crate::decoder::IdDecoder;
use crate::error::{DecoderError, Result};
use crate::extract::{extract_id, extract_id_from_path};
use crate::models::DecodedIdentifier;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Failure message for inputs with no extractable identifier
pub const NO_IDENTIFIER_FOUND: &str = "no 36-digit identifier found";

/// Position of a single item in the decode pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Pending,
    Extracted,
    ExtractionFailed,
    Decoded,
    DecodeFailed,
}

impl ItemState {
    pub fn can_transition_to(self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (ItemState::Pending, ItemState::Extracted)
                | (ItemState::Pending, ItemState::ExtractionFailed)
                | (ItemState::Extracted, ItemState::Decoded)
                | (ItemState::Extracted, ItemState::DecodeFailed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ItemState::Decoded | ItemState::ExtractionFailed | ItemState::DecodeFailed
        )
    }

    pub fn is_failure(self) -> bool {
        matches!(self, ItemState::ExtractionFailed | ItemState::DecodeFailed)
    }
}

/// Outcome of one item in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutcome<T> {
    /// 0-based position in the input list
    pub index: usize,

    /// The raw input, as a display string
    pub input: String,

    /// The identifier the item resolved to, once extraction succeeded
    pub extracted_id: Option<String>,

    pub state: ItemState,

    pub value: Option<T>,

    pub error: Option<String>,
}

impl<T> ItemOutcome<T> {
    pub fn pending(index: usize, input: impl Into<String>) -> Self {
        Self {
            index,
            input: input.into(),
            extracted_id: None,
            state: ItemState::Pending,
            value: None,
            error: None,
        }
    }

    fn advance(&mut self, next: ItemState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal item transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    pub fn extracted(mut self, id: impl Into<String>) -> Self {
        self.advance(ItemState::Extracted);
        self.extracted_id = Some(id.into());
        self
    }

    pub fn extraction_failed(mut self, reason: impl Into<String>) -> Self {
        self.advance(ItemState::ExtractionFailed);
        self.error = Some(reason.into());
        self
    }

    pub fn decoded(mut self, value: T) -> Self {
        self.advance(ItemState::Decoded);
        self.value = Some(value);
        self
    }

    pub fn decode_failed(mut self, reason: impl Into<String>) -> Self {
        self.advance(ItemState::DecodeFailed);
        self.error = Some(reason.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.state == ItemState::Decoded
    }

    /// Transform the success value, keeping position and state
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ItemOutcome<U> {
        ItemOutcome {
            index: self.index,
            input: self.input,
            extracted_id: self.extracted_id,
            state: self.state,
            value: self.value.map(f),
            error: self.error,
        }
    }
}

/// Ordered per-item results plus aggregate counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome<T> {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ItemOutcome<T>>,
}

impl<T> BatchOutcome<T> {
    pub fn from_items(items: Vec<ItemOutcome<T>>) -> Self {
        let succeeded = items.iter().filter(|item| item.is_success()).count();
        Self {
            total: items.len(),
            succeeded,
            failed: items.len() - succeeded,
            items,
        }
    }

    pub fn successes(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(|item| item.value.as_ref())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome<T>> {
        self.items.iter().filter(|item| item.state.is_failure())
    }

    /// Percentage of items that decoded; an empty outcome counts as 100%
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} items: {} succeeded, {} failed ({:.1}% success)",
            self.total,
            self.succeeded,
            self.failed,
            self.success_rate()
        )
    }

    pub fn into_items(self) -> Vec<ItemOutcome<T>> {
        self.items
    }
}

impl<T> FromIterator<ItemOutcome<T>> for BatchOutcome<T> {
    fn from_iter<I: IntoIterator<Item = ItemOutcome<T>>>(iter: I) -> Self {
        Self::from_items(iter.into_iter().collect())
    }
}

/// Batch front end over [`IdDecoder`]
#[derive(Debug, Clone, Default)]
pub struct BatchDecoder {
    decoder: IdDecoder,
    config: DecoderConfig,
}

impl BatchDecoder {
    pub fn new(language: Language) -> Self {
        Self::from_config(DecoderConfig::default().with_language(language))
    }

    pub fn from_config(config: DecoderConfig) -> Self {
        Self {
            decoder: IdDecoder::new(config.language),
            config,
        }
    }

    pub fn decoder(&self) -> &IdDecoder {
        &self.decoder
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a list of raw identifiers. Each item is trimmed first.
    pub fn decode_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<BatchOutcome<DecodedIdentifier>> {
        ensure_non_empty(ids.len(), "identifier")?;

        let outcome: BatchOutcome<_> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| self.decode_id_item(index, id.as_ref()))
            .collect();

        info!("Identifier batch: {}", outcome.summary());
        Ok(outcome)
    }

    /// Extract an identifier from each text, then decode it
    pub fn decode_texts<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> Result<BatchOutcome<DecodedIdentifier>> {
        ensure_non_empty(texts.len(), "text")?;

        let outcome: BatchOutcome<_> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let text = text.as_ref();
                let pending = ItemOutcome::pending(index, text);
                match extract_id(text) {
                    Some(id) => self.decode_into(pending, id, |decoded| decoded),
                    None => miss(pending, NO_IDENTIFIER_FOUND),
                }
            })
            .collect();

        info!("Text batch: {}", outcome.summary());
        Ok(outcome)
    }

    /// Decode the identifier embedded in each path's file name
    pub fn decode_file_names<P: AsRef<Path>>(
        &self,
        paths: &[P],
    ) -> Result<BatchOutcome<DecodedIdentifier>> {
        ensure_non_empty(paths.len(), "file name")?;

        let outcome: BatchOutcome<_> = paths
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let path = path.as_ref();
                let pending = ItemOutcome::pending(index, path.display().to_string());
                match extract_id_from_path(path) {
                    Some(id) => self.decode_into(pending, &id, |decoded| decoded),
                    None => miss(pending, NO_IDENTIFIER_FOUND),
                }
            })
            .collect();

        info!("File-name batch: {}", outcome.summary());
        Ok(outcome)
    }

    /// One item of [`BatchDecoder::decode_ids`]
    pub(crate) fn decode_id_item(&self, index: usize, raw: &str) -> ItemOutcome<DecodedIdentifier> {
        let pending = ItemOutcome::pending(index, raw);
        let id = raw.trim();
        if id.is_empty() {
            return miss(pending, format!("identifier #{} is empty", index + 1));
        }
        self.decode_into(pending, id, |decoded| decoded)
    }

    /// Mark the item extracted, decode, and wrap the result
    pub(crate) fn decode_into<T>(
        &self,
        pending: ItemOutcome<T>,
        id: &str,
        wrap: impl FnOnce(DecodedIdentifier) -> T,
    ) -> ItemOutcome<T> {
        let extracted = pending.extracted(id);
        match self.decoder.decode(id) {
            Ok(decoded) => extracted.decoded(wrap(decoded)),
            Err(e) => {
                warn!("Item {} failed to decode: {}", extracted.index + 1, e);
                extracted.decode_failed(e.to_string())
            }
        }
    }
}

pub(crate) fn miss<T>(pending: ItemOutcome<T>, reason: impl Into<String>) -> ItemOutcome<T> {
    let reason = reason.into();
    warn!("Item {} ('{}'): {}", pending.index + 1, pending.input, reason);
    pending.extraction_failed(reason)
}

pub(crate) fn ensure_non_empty(len: usize, what: &str) -> Result<()> {
    if len == 0 {
        return Err(DecoderError::empty_batch(what));
    }
    Ok(())
}
