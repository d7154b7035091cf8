//! Tests for the batch orchestrator
//!
//! Shared fixtures live here; each submodule covers one batch family.


use super::Sheet;

/// Building damage, adobe/wood, minor-damage area, 2024-01-15 10:30:00
pub const VALID_ID: &str = "110105000000202401151030000011301001";

/// Lifeline damage, transportation, affected extent, 2023-12-31 23:59:59
pub const OTHER_VALID_ID: &str = "440305000000202312312359590021401002";

/// Structurally fine except for month 13
pub const BAD_MONTH_ID: &str = "110105000000202413151030000011301001";

/// Build a sheet from string literals
pub fn create_test_sheet(name: &str, rows: &[&[&str]]) -> Sheet {
    Sheet::new(
        name,
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}
