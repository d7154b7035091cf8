//! Spreadsheet-style batches.
//!
//! A [`Sheet`] is a grid of string cells where row 1 is the header. Rows are
//! numbered from 1 and columns from 0, matching how an operator reads an
//! exported sheet. When the caller names no identifier column, one is
//! detected from the header text and confirmed against sample rows.

use super::{BatchDecoder, BatchOutcome, ItemOutcome, NO_IDENTIFIER_FOUND, ensure_non_empty, miss};
use crate::config::SheetDetectionConfig;
use crate::error::{DecoderError, Result};
use crate::extract::{contains_id, extract_id};
use crate::models::DecodedIdentifier;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// A named grid of string cells; `rows[0]` is the header row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Read a CSV export. Every record becomes a row, including the header;
    /// ragged rows are kept as-is.
    pub fn from_csv_reader<R: io::Read>(name: impl Into<String>, reader: R) -> csv::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let rows = csv_reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<csv::Result<Vec<Vec<String>>>>()?;

        Ok(Self::new(name, rows))
    }

    /// Read a CSV file; the sheet is named after the file stem
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file = std::fs::File::open(path)?;
        let sheet = Self::from_csv_reader(name, file).map_err(|source| DecoderError::Sheet {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Read {} rows from {}", sheet.last_row(), path.display());
        Ok(sheet)
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of the last row (1-based); 0 for an empty sheet
    pub fn last_row(&self) -> usize {
        self.rows.len()
    }

    /// Cell at a 1-based row and 0-based column
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let cells = self.rows.get(row.checked_sub(1)?)?;
        cells.get(column).map(String::as_str)
    }

    /// Find the identifier column.
    ///
    /// Header cells containing one of the keywords are tried first, each
    /// confirmed by an extractable identifier among the sample rows. Failing
    /// that, the leftmost `scan_columns` columns are tried in order.
    pub fn detect_id_column(&self, detection: &SheetDetectionConfig) -> Option<usize> {
        let first = detection.first_data_row.max(1);
        let last = first
            .saturating_add(detection.sample_rows)
            .saturating_sub(1)
            .min(self.last_row());
        let has_id = |column: usize| {
            (first..=last).any(|row| self.cell(row, column).is_some_and(contains_id))
        };

        let keywords: Vec<String> = detection
            .header_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let by_header = self.header().and_then(|header| {
            header.iter().enumerate().find_map(|(column, title)| {
                let title = title.to_lowercase();
                (keywords.iter().any(|k| title.contains(k.as_str())) && has_id(column))
                    .then_some(column)
            })
        });

        by_header.or_else(|| (0..detection.scan_columns).find(|&column| has_id(column)))
    }
}

/// Which part of a sheet to decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetOptions {
    /// 0-based; detected when absent
    pub id_column: Option<usize>,

    /// 0-based column carrying a free-form note for each row
    pub description_column: Option<usize>,

    /// 1-based, inclusive; defaults to the first data row
    pub start_row: Option<usize>,

    /// 1-based, inclusive; defaults to the last row
    pub end_row: Option<usize>,
}

impl SheetOptions {
    pub fn with_id_column(mut self, column: usize) -> Self {
        self.id_column = Some(column);
        self
    }

    pub fn with_description_column(mut self, column: usize) -> Self {
        self.description_column = Some(column);
        self
    }

    pub fn with_rows(mut self, start: usize, end: usize) -> Self {
        self.start_row = Some(start);
        self.end_row = Some(end);
        self
    }
}

/// A successfully decoded sheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub row_number: usize,
    pub description: Option<String>,
    pub decoded: DecodedIdentifier,
}

/// Per-row results of a sheet batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetReport {
    pub sheet: String,
    pub id_column: usize,

    /// True when the identifier column was found by detection
    pub column_detected: bool,

    pub start_row: usize,
    pub end_row: usize,
    pub outcome: BatchOutcome<SheetRow>,
}

impl SheetReport {
    /// Sheet row number of a batch item
    pub fn row_number(&self, item: &ItemOutcome<SheetRow>) -> usize {
        self.start_row + item.index
    }
}

impl BatchDecoder {
    pub fn decode_sheet(&self, sheet: &Sheet, options: &SheetOptions) -> Result<SheetReport> {
        let detection = &self.config().sheet;

        let start_row = options.start_row.unwrap_or(detection.first_data_row).max(1);
        let end_row = options
            .end_row
            .unwrap_or(sheet.last_row())
            .min(sheet.last_row());
        ensure_non_empty((start_row..=end_row).count(), "sheet row")?;

        let (id_column, column_detected) = match options.id_column {
            Some(column) => (column, false),
            None => {
                let column = sheet.detect_id_column(detection).ok_or_else(|| {
                    DecoderError::IdColumnNotFound {
                        sheet: sheet.name.clone(),
                    }
                })?;
                info!("Detected identifier column {} in sheet '{}'", column, sheet.name);
                (column, true)
            }
        };

        let outcome: BatchOutcome<_> = (start_row..=end_row)
            .enumerate()
            .map(|(index, row)| self.decode_sheet_row(sheet, index, row, id_column, options))
            .collect();

        info!("Sheet '{}' rows {}-{}: {}", sheet.name, start_row, end_row, outcome.summary());

        Ok(SheetReport {
            sheet: sheet.name.clone(),
            id_column,
            column_detected,
            start_row,
            end_row,
            outcome,
        })
    }

    fn decode_sheet_row(
        &self,
        sheet: &Sheet,
        index: usize,
        row: usize,
        id_column: usize,
        options: &SheetOptions,
    ) -> ItemOutcome<SheetRow> {
        let cell = sheet.cell(row, id_column).map(str::trim).unwrap_or_default();
        let pending = ItemOutcome::pending(index, cell);

        if cell.is_empty() {
            return miss(pending, format!("row {}: ID cell is empty", row));
        }

        let Some(id) = extract_id(cell) else {
            return miss(pending, format!("row {}: {}", row, NO_IDENTIFIER_FOUND));
        };

        let description = options
            .description_column
            .and_then(|column| sheet.cell(row, column))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        self.decode_into(pending, id, |decoded| SheetRow {
            row_number: row,
            description,
            decoded,
        })
    }
}
