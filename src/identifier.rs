//! Structural validation of the 36-digit composite identifier.
//!
//! Validation is the decoder's first step and is also usable on its own:
//! exact length, ASCII digits only, and a time segment that names a real
//! calendar instant. Once an identifier passes, every field is a plain
//! byte slice at a fixed offset.

use crate::constants::{ID_LENGTH, id_layout};
use crate::error::{DecoderError, FormatViolation, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Parse a YYYYMMDDHHMMSS time code. Out-of-range and non-calendar values
/// (month 13, Feb 30, hour 24, second 60) are rejected rather than clamped.
/// Years start at 0001.
pub fn parse_time_code(time_code: &str) -> Option<NaiveDateTime> {
    if time_code.len() != id_layout::TIME.len || !time_code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |start: usize, len: usize| time_code[start..start + len].parse::<u32>().ok();

    let year = field(0, 4).filter(|&year| year > 0)? as i32;
    let month = field(4, 2)?;
    let day = field(6, 2)?;
    let hour = field(8, 2)?;
    let minute = field(10, 2)?;
    let second = field(12, 2)?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Check an identifier and return its event timestamp
pub fn check_identifier(id: &str) -> std::result::Result<NaiveDateTime, FormatViolation> {
    if id.is_empty() {
        return Err(FormatViolation::Empty);
    }

    let actual = id.chars().count();
    if actual != ID_LENGTH {
        return Err(FormatViolation::WrongLength {
            expected: ID_LENGTH,
            actual,
        });
    }

    if let Some((index, character)) = id.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(FormatViolation::NonDigit {
            position: index + 1,
            character,
        });
    }

    let time_code = id_layout::TIME.slice(id);
    parse_time_code(time_code).ok_or_else(|| FormatViolation::InvalidTimestamp {
        time_code: time_code.to_string(),
    })
}

/// Pre-flight check; never fails
pub fn is_valid(id: &str) -> bool {
    check_identifier(id).is_ok()
}

/// A structurally valid composite identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId {
    raw: String,
    timestamp: NaiveDateTime,
}

impl CompositeId {
    pub fn parse(id: &str) -> Result<Self> {
        let timestamp =
            check_identifier(id).map_err(|violation| DecoderError::invalid_identifier(id, violation))?;

        Ok(Self {
            raw: id.to_string(),
            timestamp,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn geo_code(&self) -> &str {
        id_layout::GEO.slice(&self.raw)
    }

    pub fn time_code(&self) -> &str {
        id_layout::TIME.slice(&self.raw)
    }

    pub fn source_category_code(&self) -> &str {
        id_layout::SOURCE_CATEGORY.slice(&self.raw)
    }

    pub fn source_subcategory_code(&self) -> &str {
        id_layout::SOURCE_SUBCATEGORY.slice(&self.raw)
    }

    pub fn carrier_code(&self) -> &str {
        id_layout::CARRIER.slice(&self.raw)
    }

    pub fn disaster_code(&self) -> &str {
        id_layout::DISASTER.slice(&self.raw)
    }

    pub fn disaster_category_code(&self) -> &str {
        id_layout::DISASTER_CATEGORY.slice(self.disaster_code())
    }

    pub fn disaster_subcategory_code(&self) -> &str {
        id_layout::DISASTER_SUBCATEGORY.slice(self.disaster_code())
    }

    pub fn disaster_indicator_code(&self) -> &str {
        id_layout::DISASTER_INDICATOR.slice(self.disaster_code())
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for CompositeId {
    type Err = DecoderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for CompositeId {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
