//! Extraction of composite identifiers from free text.
//!
//! File names, spreadsheet cells and report bodies often carry an
//! identifier surrounded by other characters. The extractor returns the
//! leftmost run of exactly 36 ASCII digits. Longer runs never match: any
//! 36-digit window inside them would be a guess.

use crate::constants::ID_LENGTH;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit-run pattern is valid"));

/// Every maximal run of exactly 36 digits, left to right
pub fn extract_ids(text: &str) -> impl Iterator<Item = &str> {
    DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|run| run.len() == ID_LENGTH)
}

/// First maximal run of exactly 36 digits, if any
pub fn extract_id(text: &str) -> Option<&str> {
    extract_ids(text).next()
}

pub fn contains_id(text: &str) -> bool {
    extract_id(text).is_some()
}

/// Extract from the file-name component of a path
pub fn extract_id_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    extract_id(&name).map(str::to_string)
}
