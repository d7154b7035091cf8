//! Core data structures produced by the decoder.
//!
//! Every value here is a pure function of its input string: built once,
//! never mutated, serializable for whatever layer renders or stores it.

use crate::constants::GEO_CODE_LENGTH;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The coded fields of a composite identifier that resolve through a code table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeField {
    SourceCategory,
    SourceSubcategory,
    Carrier,
    DisasterCategory,
    DisasterSubcategory,
    DisasterIndicator,
}

impl fmt::Display for CodeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeField::SourceCategory => "source category",
            CodeField::SourceSubcategory => "source sub-category",
            CodeField::Carrier => "carrier",
            CodeField::DisasterCategory => "disaster category",
            CodeField::DisasterSubcategory => "disaster sub-category",
            CodeField::DisasterIndicator => "disaster indicator",
        };
        write!(f, "{}", name)
    }
}

/// A well-formed code with no entry in its table. Decoding still succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownCode {
    pub field: CodeField,
    pub code: String,
}

/// Result of decoding a 36-digit composite identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedIdentifier {
    pub original_id: String,

    /// Positions 1-12
    pub geo_code: String,

    /// Positions 13-26, YYYYMMDDHHMMSS
    pub time_code: String,
    pub event_timestamp: NaiveDateTime,

    /// Position 27
    pub source_category_code: String,
    pub source_category_name: String,

    /// Positions 28-29
    pub source_subcategory_code: String,
    pub source_subcategory_name: String,

    /// Position 30
    pub carrier_code: String,
    pub carrier_name: String,

    /// Positions 31-36
    pub disaster_code: String,
    pub disaster_category_code: String,
    pub disaster_category_name: String,
    pub disaster_subcategory_code: String,
    pub disaster_subcategory_name: String,
    pub disaster_indicator_code: String,
    pub disaster_indicator_name: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_codes: Vec<UnknownCode>,
}

impl DecodedIdentifier {
    /// The six top-level segments in identifier order
    pub fn segments(&self) -> [&str; 6] {
        [
            &self.geo_code,
            &self.time_code,
            &self.source_category_code,
            &self.source_subcategory_code,
            &self.carrier_code,
            &self.disaster_code,
        ]
    }

    /// Concatenate the segments back into the identifier
    pub fn reassemble(&self) -> String {
        self.segments().concat()
    }

    /// True when every coded field resolved to a table entry
    pub fn is_fully_resolved(&self) -> bool {
        self.unknown_codes.is_empty()
    }

    /// Decompose the geographic sub-field
    pub fn geo(&self) -> crate::Result<GeoCodeDecomposition> {
        crate::geo::parse_geo_code(&self.geo_code)
    }
}

/// Coarse jurisdiction levels a geo-code can be rolled up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupLevel {
    Province,
    City,
    District,
    Township,
}

impl RollupLevel {
    pub const ALL: [RollupLevel; 4] = [
        RollupLevel::Province,
        RollupLevel::City,
        RollupLevel::District,
        RollupLevel::Township,
    ];

    /// Number of leading digits kept before zero-padding
    pub fn prefix_len(self) -> usize {
        match self {
            RollupLevel::Province => 2,
            RollupLevel::City => 4,
            RollupLevel::District => 6,
            RollupLevel::Township => 9,
        }
    }
}

impl fmt::Display for RollupLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RollupLevel::Province => "province",
            RollupLevel::City => "city",
            RollupLevel::District => "district",
            RollupLevel::Township => "township",
        };
        write!(f, "{}", name)
    }
}

/// Every level of the administrative hierarchy, finest last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrativeLevel {
    Province,
    City,
    District,
    Township,
    Village,
}

impl fmt::Display for AdministrativeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdministrativeLevel::Province => "province",
            AdministrativeLevel::City => "city",
            AdministrativeLevel::District => "district",
            AdministrativeLevel::Township => "township",
            AdministrativeLevel::Village => "village",
        };
        write!(f, "{}", name)
    }
}

/// A 12-digit geo-code split into its jurisdiction segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoCodeDecomposition {
    pub geo_code: String,

    pub province_code: String,
    pub city_code: String,
    pub district_code: String,
    pub township_code: String,
    pub village_code: String,

    /// Roll-up codes, each 12 digits with the finer segments zeroed
    pub province_level_code: String,
    pub city_level_code: String,
    pub district_level_code: String,
    pub township_level_code: String,
}

impl GeoCodeDecomposition {
    /// Positional segments, province first
    pub fn segments(&self) -> [&str; 5] {
        [
            &self.province_code,
            &self.city_code,
            &self.district_code,
            &self.township_code,
            &self.village_code,
        ]
    }

    pub fn rollup(&self, level: RollupLevel) -> &str {
        match level {
            RollupLevel::Province => &self.province_level_code,
            RollupLevel::City => &self.city_level_code,
            RollupLevel::District => &self.district_level_code,
            RollupLevel::Township => &self.township_level_code,
        }
    }

    /// Lookup keys for an external boundary service, coarsest first
    pub fn rollups(&self) -> [(RollupLevel, &str); 4] {
        RollupLevel::ALL.map(|level| (level, self.rollup(level)))
    }

    /// Finest level whose segment is not all zeros
    pub fn granularity(&self) -> AdministrativeLevel {
        let levels = [
            (AdministrativeLevel::Village, &self.village_code),
            (AdministrativeLevel::Township, &self.township_code),
            (AdministrativeLevel::District, &self.district_code),
            (AdministrativeLevel::City, &self.city_code),
        ];

        levels
            .into_iter()
            .find(|(_, segment)| segment.bytes().any(|b| b != b'0'))
            .map(|(level, _)| level)
            .unwrap_or(AdministrativeLevel::Province)
    }
}

/// Zero-pad a geo-code prefix to full length
pub(crate) fn pad_rollup(prefix: &str) -> String {
    format!("{:0<width$}", prefix, width = GEO_CODE_LENGTH)
}

/// An ingested data record that may carry a composite identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Record key in the source store; sometimes the identifier itself
    pub record_id: Option<String>,

    /// Identifier supplied explicitly by the uploader
    pub disaster_id: Option<String>,

    /// Free-form content that may embed an identifier
    pub content: Option<String>,
}

impl DataRecord {
    pub fn with_record_id(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }

    pub fn with_disaster_id(mut self, disaster_id: impl Into<String>) -> Self {
        self.disaster_id = Some(disaster_id.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// A data record with its identifier decoded into flat columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub record: DataRecord,
    pub disaster_id: String,
    pub geo_code: String,
    pub event_timestamp: NaiveDateTime,
    pub source_category: String,
    pub source_subcategory: String,
    pub carrier_type: String,
    pub disaster_category: String,
    pub disaster_subcategory: String,
    pub disaster_indicator: String,
    pub decoded_description: String,
}

impl EnrichedRecord {
    pub fn new(mut record: DataRecord, decoded: &DecodedIdentifier) -> Self {
        record.disaster_id = Some(decoded.original_id.clone());
        Self {
            record,
            disaster_id: decoded.original_id.clone(),
            geo_code: decoded.geo_code.clone(),
            event_timestamp: decoded.event_timestamp,
            source_category: decoded.source_category_name.clone(),
            source_subcategory: decoded.source_subcategory_name.clone(),
            carrier_type: decoded.carrier_name.clone(),
            disaster_category: decoded.disaster_category_name.clone(),
            disaster_subcategory: decoded.disaster_subcategory_name.clone(),
            disaster_indicator: decoded.disaster_indicator_name.clone(),
            decoded_description: decoded.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decomposition(code: &str) -> GeoCodeDecomposition {
        crate::geo::parse_geo_code(code).unwrap()
    }

    #[test]
    fn test_pad_rollup() {
        assert_eq!(pad_rollup("11"), "110000000000");
        assert_eq!(pad_rollup("110105003"), "110105003000");
    }

    #[test]
    fn test_granularity() {
        assert_eq!(decomposition("110000000000").granularity(), AdministrativeLevel::Province);
        assert_eq!(decomposition("110100000000").granularity(), AdministrativeLevel::City);
        assert_eq!(decomposition("110105000000").granularity(), AdministrativeLevel::District);
        assert_eq!(decomposition("110105003000").granularity(), AdministrativeLevel::Township);
        assert_eq!(decomposition("110105003001").granularity(), AdministrativeLevel::Village);
    }

    #[test]
    fn test_rollups_are_ordered_coarsest_first() {
        let geo = decomposition("110105003001");
        let rollups = geo.rollups();
        assert_eq!(rollups[0], (RollupLevel::Province, "110000000000"));
        assert_eq!(rollups[3], (RollupLevel::Township, "110105003000"));
    }

    #[test]
    fn test_data_record_builder() {
        let record = DataRecord::default()
            .with_record_id("r-1")
            .with_content("report body");
        assert_eq!(record.record_id.as_deref(), Some("r-1"));
        assert!(record.disaster_id.is_none());
        assert_eq!(record.content.as_deref(), Some("report body"));
    }

    #[test]
    fn test_code_field_serializes_snake_case() {
        let json = serde_json::to_string(&CodeField::DisasterSubcategory).unwrap();
        assert_eq!(json, "\"disaster_subcategory\"");
    }
}
