//! Identifier decoding.
//!
//! Slices a validated identifier at fixed offsets, resolves every coded
//! field through the code tables and assembles a readable description.
//! Decoding is total over structurally valid input: a code missing from its
//! table resolves to the unknown label and is recorded on the result, it is
//! never an error.

use crate::codes::{self, CodeEntry, Language};
use crate::constants::DESCRIPTION_TIME_FORMAT;
use crate::error::Result;
use crate::identifier::CompositeId;
use crate::models::{CodeField, DecodedIdentifier, UnknownCode};
use tracing::debug;

/// Decoder bound to a label language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdDecoder {
    language: Language,
}

impl IdDecoder {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Decode a 36-digit identifier. The input is not trimmed.
    pub fn decode(&self, id: &str) -> Result<DecodedIdentifier> {
        let id = CompositeId::parse(id)?;
        Ok(self.decode_parsed(&id))
    }

    /// Decode an identifier that has already passed validation
    pub fn decode_parsed(&self, id: &CompositeId) -> DecodedIdentifier {
        let lang = self.language;
        let unknown = lang.unknown_label();
        let mut unknown_codes = Vec::new();

        let mut resolve = |field: CodeField, code: &str, entry: Option<&'static CodeEntry>| -> String {
            match entry {
                Some(entry) => entry.label(lang).to_string(),
                None => {
                    debug!("Unknown {} code '{}' in {}", field, code, id);
                    unknown_codes.push(UnknownCode {
                        field,
                        code: code.to_string(),
                    });
                    unknown.to_string()
                }
            }
        };

        let category = id.disaster_category_code();

        let source_category_name = resolve(
            CodeField::SourceCategory,
            id.source_category_code(),
            codes::SOURCE_CATEGORIES.get(id.source_category_code()),
        );
        let source_subcategory_name = resolve(
            CodeField::SourceSubcategory,
            id.source_subcategory_code(),
            codes::SOURCE_SUBCATEGORIES.get(id.source_subcategory_code()),
        );
        let carrier_name = resolve(
            CodeField::Carrier,
            id.carrier_code(),
            codes::CARRIERS.get(id.carrier_code()),
        );
        let disaster_category_name = resolve(
            CodeField::DisasterCategory,
            category,
            codes::DISASTER_CATEGORIES.get(category),
        );
        let disaster_subcategory_name = resolve(
            CodeField::DisasterSubcategory,
            id.disaster_subcategory_code(),
            codes::DISASTER_SUBCATEGORIES.get(category, id.disaster_subcategory_code()),
        );
        let disaster_indicator_name = resolve(
            CodeField::DisasterIndicator,
            id.disaster_indicator_code(),
            codes::DISASTER_INDICATORS.get(category, id.disaster_indicator_code()),
        );

        let mut decoded = DecodedIdentifier {
            original_id: id.as_str().to_string(),
            geo_code: id.geo_code().to_string(),
            time_code: id.time_code().to_string(),
            event_timestamp: id.timestamp(),
            source_category_code: id.source_category_code().to_string(),
            source_category_name,
            source_subcategory_code: id.source_subcategory_code().to_string(),
            source_subcategory_name,
            carrier_code: id.carrier_code().to_string(),
            carrier_name,
            disaster_code: id.disaster_code().to_string(),
            disaster_category_code: category.to_string(),
            disaster_category_name,
            disaster_subcategory_code: id.disaster_subcategory_code().to_string(),
            disaster_subcategory_name,
            disaster_indicator_code: id.disaster_indicator_code().to_string(),
            disaster_indicator_name,
            description: String::new(),
            unknown_codes,
        };
        decoded.description = describe(&decoded, lang);
        decoded
    }
}

/// Decode with the default (Chinese) labels
pub fn decode(id: &str) -> Result<DecodedIdentifier> {
    IdDecoder::default().decode(id)
}

/// Build the one-line summary for a decoded identifier.
///
/// Sub-category and indicator are left out when they are listed in
/// `unknown_codes`.
pub fn describe(decoded: &DecodedIdentifier, language: Language) -> String {
    let unresolved = |field: CodeField| decoded.unknown_codes.iter().any(|u| u.field == field);
    let (source, carrier, time) = match language {
        Language::Zh => ("来源", "载体", "时间"),
        Language::En => ("Source", "Carrier", "Time"),
    };

    let mut description = decoded.disaster_category_name.clone();
    for (field, name) in [
        (CodeField::DisasterSubcategory, &decoded.disaster_subcategory_name),
        (CodeField::DisasterIndicator, &decoded.disaster_indicator_name),
    ] {
        if !unresolved(field) {
            description.push_str(" - ");
            description.push_str(name);
        }
    }

    format!(
        "{} | {}: {} | {}: {} | {}: {}",
        description,
        source,
        decoded.source_subcategory_name,
        carrier,
        decoded.carrier_name,
        time,
        decoded.event_timestamp.format(DESCRIPTION_TIME_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecoderError, FormatViolation};
    use chrono::NaiveDate;

    const SAMPLE: &str = "110105000000202401151030000011301001";

    #[test]
    fn test_decode_building_damage_sample() {
        let decoded = decode(SAMPLE).unwrap();

        assert_eq!(decoded.original_id, SAMPLE);
        assert_eq!(decoded.geo_code, "110105000000");
        assert_eq!(decoded.time_code, "20240115103000");
        assert_eq!(
            decoded.event_timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
        assert_eq!(decoded.source_category_name, "系统内部");
        assert_eq!(decoded.source_subcategory_name, "后方指挥部");
        assert_eq!(decoded.carrier_name, "图像");
        assert_eq!(decoded.disaster_category_code, "3");
        assert_eq!(decoded.disaster_category_name, "房屋破坏");
        assert_eq!(decoded.disaster_subcategory_code, "01");
        assert_eq!(decoded.disaster_subcategory_name, "土木");
        assert_eq!(decoded.disaster_indicator_code, "001");
        assert_eq!(decoded.disaster_indicator_name, "一般损坏面积");
        assert!(decoded.is_fully_resolved());
    }

    #[test]
    fn test_description_zh() {
        let decoded = decode(SAMPLE).unwrap();
        assert_eq!(
            decoded.description,
            "房屋破坏 - 土木 - 一般损坏面积 | 来源: 后方指挥部 | 载体: 图像 | 时间: 2024-01-15T10:30:00"
        );
    }

    #[test]
    fn test_description_en() {
        let decoded = IdDecoder::new(Language::En).decode(SAMPLE).unwrap();
        assert_eq!(decoded.carrier_name, "Image");
        assert_eq!(
            decoded.description,
            "Building damage - Adobe/wood - Minor-damage area | Source: Rear command post | Carrier: Image | Time: 2024-01-15T10:30:00"
        );
    }

    #[test]
    fn test_unknown_codes_resolve_without_error() {
        // source category 7, source sub 99, carrier 9, category 8
        let id = "110105000000202401151030007999801001";
        let decoded = decode(id).unwrap();

        assert_eq!(decoded.source_category_name, "未知");
        assert_eq!(decoded.source_subcategory_name, "未知");
        assert_eq!(decoded.carrier_name, "未知");
        assert_eq!(decoded.disaster_category_name, "未知");
        assert_eq!(decoded.disaster_subcategory_name, "未知");
        assert_eq!(decoded.disaster_indicator_name, "未知");

        let fields: Vec<CodeField> = decoded.unknown_codes.iter().map(|u| u.field).collect();
        assert_eq!(
            fields,
            vec![
                CodeField::SourceCategory,
                CodeField::SourceSubcategory,
                CodeField::Carrier,
                CodeField::DisasterCategory,
                CodeField::DisasterSubcategory,
                CodeField::DisasterIndicator,
            ]
        );
        assert_eq!(
            decoded.description,
            "未知 | 来源: 未知 | 载体: 未知 | 时间: 2024-01-15T10:30:00"
        );
    }

    #[test]
    fn test_subcategory_resolution_depends_on_category() {
        // same "01"/"001" tail under casualties
        let decoded = decode("110105000000202401151030000011201001").unwrap();
        assert_eq!(decoded.disaster_category_name, "人员伤亡及失踪");
        assert_eq!(decoded.disaster_subcategory_name, "死亡");
        assert_eq!(decoded.disaster_indicator_name, "受灾人数");
    }

    #[test]
    fn test_partially_unknown_description_skips_unknown_parts() {
        // category 2 has no indicator 003
        let decoded = decode("110105000000202401151030000011202003").unwrap();
        assert_eq!(decoded.disaster_subcategory_name, "受伤");
        assert_eq!(decoded.disaster_indicator_name, "未知");
        assert!(decoded.description.starts_with("人员伤亡及失踪 - 受伤 | "));
        assert_eq!(decoded.unknown_codes.len(), 1);
    }

    #[test]
    fn test_description_follows_recorded_unknown_codes() {
        let mut decoded = decode(SAMPLE).unwrap();
        assert_eq!(decoded.description, describe(&decoded, Language::Zh));

        decoded.unknown_codes.push(UnknownCode {
            field: CodeField::DisasterIndicator,
            code: "001".to_string(),
        });
        assert_eq!(
            describe(&decoded, Language::Zh),
            "房屋破坏 - 土木 | 来源: 后方指挥部 | 载体: 图像 | 时间: 2024-01-15T10:30:00"
        );
    }

    #[test]
    fn test_decode_reports_format_errors() {
        let err = decode("12345").unwrap_err();
        assert!(err.is_format_error());

        let err = decode("110105000000202413151030000011301001").unwrap_err();
        match err {
            DecoderError::InvalidIdentifier { input, violation } => {
                assert_eq!(input, "110105000000202413151030000011301001");
                assert!(matches!(violation, FormatViolation::InvalidTimestamp { .. }));
            }
            other => panic!("Expected InvalidIdentifier, got {:?}", other),
        }
    }

    #[test]
    fn test_reassemble_round_trip() {
        let decoded = decode(SAMPLE).unwrap();
        assert_eq!(decoded.reassemble(), SAMPLE);
        assert_eq!(decoded.geo().unwrap().district_level_code, "110105000000");
    }
}
