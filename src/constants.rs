//! Layout constants and defaults for the identifier decoder
//!
//! All fixed offsets of the 36-digit composite identifier and the 12-digit
//! geo-code live here, so a revision of either format touches one table.

// =============================================================================
// Field Layout
// =============================================================================

/// A fixed-width field: 0-based start offset and length in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub len: usize,
}

impl FieldSpan {
    pub const fn new(name: &'static str, start: usize, len: usize) -> Self {
        Self { name, start, len }
    }

    /// Exclusive end offset
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// Slice this field out of an ASCII string that is known to be long enough
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        &value[self.start..self.end()]
    }
}

/// Total length of a composite identifier
pub const ID_LENGTH: usize = 36;

/// Total length of an administrative geo-code
pub const GEO_CODE_LENGTH: usize = 12;

/// Layout of the 36-digit composite identifier
pub mod id_layout {
    use super::FieldSpan;

    /// Positions 1-12: administrative location
    pub const GEO: FieldSpan = FieldSpan::new("geo_code", 0, 12);

    /// Positions 13-26: event time, YYYYMMDDHHMMSS
    pub const TIME: FieldSpan = FieldSpan::new("time_code", 12, 14);

    /// Position 27
    pub const SOURCE_CATEGORY: FieldSpan = FieldSpan::new("source_category_code", 26, 1);

    /// Positions 28-29
    pub const SOURCE_SUBCATEGORY: FieldSpan = FieldSpan::new("source_subcategory_code", 27, 2);

    /// Position 30: media carrier
    pub const CARRIER: FieldSpan = FieldSpan::new("carrier_code", 29, 1);

    /// Positions 31-36: disaster classification block
    pub const DISASTER: FieldSpan = FieldSpan::new("disaster_code", 30, 6);

    /// Top-level segments in order; their concatenation is the identifier
    pub const SEGMENTS: [FieldSpan; 6] = [
        GEO,
        TIME,
        SOURCE_CATEGORY,
        SOURCE_SUBCATEGORY,
        CARRIER,
        DISASTER,
    ];

    /// Offsets below are relative to the disaster block
    pub const DISASTER_CATEGORY: FieldSpan = FieldSpan::new("disaster_category_code", 0, 1);
    pub const DISASTER_SUBCATEGORY: FieldSpan = FieldSpan::new("disaster_subcategory_code", 1, 2);
    pub const DISASTER_INDICATOR: FieldSpan = FieldSpan::new("disaster_indicator_code", 3, 3);
}

/// Layout of the 12-digit administrative geo-code
pub mod geo_layout {
    use super::FieldSpan;

    pub const PROVINCE: FieldSpan = FieldSpan::new("province_code", 0, 2);
    pub const CITY: FieldSpan = FieldSpan::new("city_code", 2, 2);
    pub const DISTRICT: FieldSpan = FieldSpan::new("district_code", 4, 2);
    pub const TOWNSHIP: FieldSpan = FieldSpan::new("township_code", 6, 3);
    pub const VILLAGE: FieldSpan = FieldSpan::new("village_code", 9, 3);

    pub const SEGMENTS: [FieldSpan; 5] = [PROVINCE, CITY, DISTRICT, TOWNSHIP, VILLAGE];
}

/// chrono format used when rendering a time code back out
pub const TIME_CODE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Timestamp rendering used in generated descriptions
pub const DESCRIPTION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// =============================================================================
// Labels
// =============================================================================

pub const UNKNOWN_LABEL_ZH: &str = "未知";
pub const UNKNOWN_LABEL_EN: &str = "Unknown";

// =============================================================================
// Sheet Column Detection Defaults
// =============================================================================

pub mod sheet {
    /// Data rows inspected when confirming a candidate ID column
    pub const DEFAULT_SAMPLE_ROWS: usize = 10;

    /// Leftmost columns scanned when no header keyword matches
    pub const DEFAULT_SCAN_COLUMNS: usize = 10;

    /// Header text that suggests an identifier column (matched case-insensitively)
    pub const DEFAULT_HEADER_KEYWORDS: &[&str] = &["id", "编码", "code", "标识"];

    /// First data row, 1-based; row 1 is the header
    pub const DEFAULT_FIRST_DATA_ROW: usize = 2;
}

// =============================================================================
// Batch Defaults
// =============================================================================

/// Batches smaller than this are decoded inline rather than split across workers
pub const DEFAULT_CONCURRENCY_THRESHOLD: usize = 256;

/// Config file location under the user config directory
pub const CONFIG_DIR_NAME: &str = "disaster-decoder";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment overrides
pub const ENV_LANGUAGE: &str = "DISASTER_DECODER_LANGUAGE";
pub const ENV_WORKERS: &str = "DISASTER_DECODER_WORKERS";
