//! Geo-code parsing.
//!
//! Splits a 12-digit administrative code into province (2), city (2),
//! district (2), township (3) and village (3) segments and derives the
//! four zero-padded roll-up codes used as keys into a boundary lookup.

use crate::constants::{GEO_CODE_LENGTH, geo_layout};
use crate::error::{DecoderError, FormatViolation, Result};
use crate::models::{GeoCodeDecomposition, RollupLevel, pad_rollup};

/// Structural check shared by [`parse_geo_code`] and [`is_valid_geo_code`]
pub fn check_geo_code(code: &str) -> std::result::Result<(), FormatViolation> {
    if code.is_empty() {
        return Err(FormatViolation::Empty);
    }

    let actual = code.chars().count();
    if actual != GEO_CODE_LENGTH {
        return Err(FormatViolation::WrongLength {
            expected: GEO_CODE_LENGTH,
            actual,
        });
    }

    if let Some((index, character)) = code.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(FormatViolation::NonDigit {
            position: index + 1,
            character,
        });
    }

    Ok(())
}

pub fn is_valid_geo_code(code: &str) -> bool {
    check_geo_code(code).is_ok()
}

/// Decompose a 12-digit geo-code
pub fn parse_geo_code(code: &str) -> Result<GeoCodeDecomposition> {
    check_geo_code(code).map_err(|violation| DecoderError::invalid_geo_code(code, violation))?;

    let rollup = |level: RollupLevel| pad_rollup(&code[..level.prefix_len()]);

    Ok(GeoCodeDecomposition {
        geo_code: code.to_string(),
        province_code: geo_layout::PROVINCE.slice(code).to_string(),
        city_code: geo_layout::CITY.slice(code).to_string(),
        district_code: geo_layout::DISTRICT.slice(code).to_string(),
        township_code: geo_layout::TOWNSHIP.slice(code).to_string(),
        village_code: geo_layout::VILLAGE.slice(code).to_string(),
        province_level_code: rollup(RollupLevel::Province),
        city_level_code: rollup(RollupLevel::City),
        district_level_code: rollup(RollupLevel::District),
        township_level_code: rollup(RollupLevel::Township),
    })
}
