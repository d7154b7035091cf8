//! Static code tables for the composite identifier
//!
//! Disaster sub-categories and indicators are scoped by the disaster
//! category: the same 2- or 3-digit code means different things under
//! different categories, so those lookups always go category first.
//! Every lookup falls back to an explicit unknown label instead of failing.

use crate::constants::{UNKNOWN_LABEL_EN, UNKNOWN_LABEL_ZH};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label language for resolved names and descriptions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[value(alias = "cn", alias = "chinese")]
    Zh,
    #[value(alias = "english")]
    En,
}

impl Language {
    pub fn unknown_label(self) -> &'static str {
        match self {
            Language::Zh => UNKNOWN_LABEL_ZH,
            Language::En => UNKNOWN_LABEL_EN,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Zh => write!(f, "zh"),
            Language::En => write!(f, "en"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "cn" | "chinese" => Ok(Language::Zh),
            "en" | "english" => Ok(Language::En),
            other => Err(format!("unsupported language '{}' (expected zh or en)", other)),
        }
    }
}

/// One code with its labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub code: &'static str,
    pub zh: &'static str,
    pub en: &'static str,
}

impl CodeEntry {
    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::Zh => self.zh,
            Language::En => self.en,
        }
    }
}

/// Flat code → label table
#[derive(Debug, Clone, Copy)]
pub struct CodeTable {
    name: &'static str,
    entries: &'static [CodeEntry],
}

impl CodeTable {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn entries(&self) -> &'static [CodeEntry] {
        self.entries
    }

    pub fn get(&self, code: &str) -> Option<&'static CodeEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Label for `code`, or the unknown label when the code is not listed
    pub fn resolve(&self, code: &str, language: Language) -> &'static str {
        self.get(code)
            .map(|entry| entry.label(language))
            .unwrap_or_else(|| language.unknown_label())
    }
}

/// Two-level table: category code → table of codes valid under that category
#[derive(Debug, Clone, Copy)]
pub struct ScopedCodeTable {
    name: &'static str,
    scopes: &'static [(&'static str, CodeTable)],
}

impl ScopedCodeTable {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scopes(&self) -> &'static [(&'static str, CodeTable)] {
        self.scopes
    }

    pub fn scope(&self, category_code: &str) -> Option<&'static CodeTable> {
        self.scopes
            .iter()
            .find(|(scope, _)| *scope == category_code)
            .map(|(_, table)| table)
    }

    pub fn get(&self, category_code: &str, code: &str) -> Option<&'static CodeEntry> {
        self.scope(category_code).and_then(|table| table.get(code))
    }

    pub fn resolve(&self, category_code: &str, code: &str, language: Language) -> &'static str {
        self.get(category_code, code)
            .map(|entry| entry.label(language))
            .unwrap_or_else(|| language.unknown_label())
    }
}

macro_rules! entry {
    ($code:expr, $zh:expr, $en:expr) => {
        CodeEntry {
            code: $code,
            zh: $zh,
            en: $en,
        }
    };
}

macro_rules! table {
    ($name:expr, [$($entry:expr),* $(,)?] $(,)?) => {
        CodeTable {
            name: $name,
            entries: &[$($entry),*],
        }
    };
}

macro_rules! scoped {
    ($name:expr, [$($scope:expr),* $(,)?] $(,)?) => {
        ScopedCodeTable {
            name: $name,
            scopes: &[$($scope),*],
        }
    };
}

// =============================================================================
// Disaster classification
// =============================================================================

pub static DISASTER_CATEGORIES: CodeTable = table!(
    "disaster category",
    [
        entry!("1", "震情", "Seismic activity"),
        entry!("2", "人员伤亡及失踪", "Casualties and missing persons"),
        entry!("3", "房屋破坏", "Building damage"),
        entry!("4", "生命线工程灾情", "Lifeline infrastructure damage"),
        entry!("5", "次生灾害", "Secondary disasters"),
    ]
);

/// Keyed by disaster category, then 2-digit sub-category
pub static DISASTER_SUBCATEGORIES: ScopedCodeTable = scoped!(
    "disaster sub-category",
    [
        (
            "1",
            table!(
                "seismic activity",
                [
                    entry!("01", "震情信息", "Seismic information"),
                ]
            ),
        ),
        (
            "2",
            table!(
                "casualties",
                [
                    entry!("01", "死亡", "Dead"),
                    entry!("02", "受伤", "Injured"),
                    entry!("03", "失踪", "Missing"),
                ]
            ),
        ),
        (
            "3",
            table!(
                "building damage",
                [
                    entry!("01", "土木", "Adobe/wood"),
                    entry!("02", "砖木", "Brick/wood"),
                    entry!("03", "砖混", "Brick/concrete"),
                    entry!("04", "框架", "Frame"),
                    entry!("05", "其他", "Other"),
                ]
            ),
        ),
        (
            "4",
            table!(
                "lifeline infrastructure",
                [
                    entry!("01", "交通", "Transportation"),
                    entry!("02", "供水", "Water supply"),
                    entry!("03", "电力", "Electric power"),
                    entry!("04", "通信", "Communications"),
                    entry!("05", "燃气", "Gas"),
                    entry!("06", "排水", "Drainage"),
                    entry!("07", "其他", "Other"),
                ]
            ),
        ),
        (
            "5",
            table!(
                "secondary disasters",
                [
                    entry!("01", "崩塌", "Collapse"),
                    entry!("02", "滑坡", "Landslide"),
                    entry!("03", "泥石流", "Debris flow"),
                    entry!("04", "岩溶塌陷", "Karst collapse"),
                    entry!("05", "地裂缝", "Ground fissure"),
                    entry!("06", "地面沉降", "Land subsidence"),
                    entry!("07", "其他", "Other"),
                ]
            ),
        ),
    ]
);

/// Keyed by disaster category, then 3-digit indicator
pub static DISASTER_INDICATORS: ScopedCodeTable = scoped!(
    "disaster indicator",
    [
        (
            "1",
            table!(
                "seismic activity",
                [
                    entry!("001", "震级", "Magnitude"),
                    entry!("002", "震中位置", "Epicenter"),
                    entry!("003", "震源深度", "Focal depth"),
                ]
            ),
        ),
        (
            "2",
            table!(
                "casualties",
                [
                    entry!("001", "受灾人数", "Affected population"),
                    entry!("002", "受灾程度", "Severity"),
                ]
            ),
        ),
        (
            "3",
            table!(
                "building damage",
                [
                    entry!("001", "一般损坏面积", "Minor-damage area"),
                    entry!("002", "严重损坏面积", "Severe-damage area"),
                    entry!("003", "受灾程度", "Severity"),
                ]
            ),
        ),
        (
            "4",
            table!(
                "lifeline infrastructure",
                [
                    entry!("001", "受灾设施数", "Affected facilities"),
                    entry!("002", "受灾范围", "Affected extent"),
                    entry!("003", "受灾程度", "Severity"),
                ]
            ),
        ),
        (
            "5",
            table!(
                "secondary disasters",
                [
                    entry!("001", "灾害损失", "Disaster losses"),
                    entry!("002", "灾害范围", "Disaster extent"),
                    entry!("003", "受灾程度", "Severity"),
                ]
            ),
        ),
    ]
);

// =============================================================================
// Source and carrier
// =============================================================================

/// Position 27
pub static SOURCE_CATEGORIES: CodeTable = table!(
    "source category",
    [
        entry!("0", "系统内部", "Internal system"),
        entry!("1", "外部接口", "External interface"),
    ]
);

/// Positions 28-29: reporting channel
pub static SOURCE_SUBCATEGORIES: CodeTable = table!(
    "source sub-category",
    [
        entry!("01", "后方指挥部", "Rear command post"),
        entry!("02", "前方指挥部", "Forward command post"),
        entry!("03", "现场调查", "Field survey"),
        entry!("04", "互联网感知", "Internet sensing"),
        entry!("05", "传感器监测", "Sensor monitoring"),
        entry!("06", "卫星遥感", "Satellite remote sensing"),
        entry!("07", "其他", "Other"),
    ]
);

/// Position 30: media type of the reported content
pub static CARRIERS: CodeTable = table!(
    "carrier",
    [
        entry!("0", "文字", "Text"),
        entry!("1", "图像", "Image"),
        entry!("2", "音频", "Audio"),
        entry!("3", "视频", "Video"),
    ]
);

// Convenience lookups mirroring the decoder's field order

pub fn disaster_category_name(category: &str, language: Language) -> &'static str {
    DISASTER_CATEGORIES.resolve(category, language)
}

pub fn disaster_subcategory_name(category: &str, subcategory: &str, language: Language) -> &'static str {
    DISASTER_SUBCATEGORIES.resolve(category, subcategory, language)
}

pub fn disaster_indicator_name(category: &str, indicator: &str, language: Language) -> &'static str {
    DISASTER_INDICATORS.resolve(category, indicator, language)
}

pub fn source_category_name(code: &str, language: Language) -> &'static str {
    SOURCE_CATEGORIES.resolve(code, language)
}

pub fn source_subcategory_name(code: &str, language: Language) -> &'static str {
    SOURCE_SUBCATEGORIES.resolve(code, language)
}

pub fn carrier_name(code: &str, language: Language) -> &'static str {
    CARRIERS.resolve(code, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert_eq!(disaster_category_name("3", Language::Zh), "房屋破坏");
        assert_eq!(disaster_category_name("3", Language::En), "Building damage");
        assert_eq!(disaster_category_name("9", Language::Zh), "未知");
        assert_eq!(disaster_category_name("9", Language::En), "Unknown");
    }

    #[test]
    fn test_subcategory_lookup_is_category_scoped() {
        // "01" means different things under different categories
        assert_eq!(disaster_subcategory_name("2", "01", Language::Zh), "死亡");
        assert_eq!(disaster_subcategory_name("3", "01", Language::Zh), "土木");
        assert_eq!(disaster_subcategory_name("4", "01", Language::Zh), "交通");

        // valid under category 4, not under category 2
        assert_eq!(disaster_subcategory_name("4", "07", Language::En), "Other");
        assert_eq!(disaster_subcategory_name("2", "07", Language::En), "Unknown");
    }

    #[test]
    fn test_indicator_lookup_is_category_scoped() {
        assert_eq!(disaster_indicator_name("1", "001", Language::Zh), "震级");
        assert_eq!(disaster_indicator_name("3", "001", Language::Zh), "一般损坏面积");
        assert_eq!(disaster_indicator_name("2", "003", Language::Zh), "未知");
    }

    #[test]
    fn test_unknown_category_scope_resolves_to_unknown() {
        assert!(DISASTER_SUBCATEGORIES.scope("0").is_none());
        assert_eq!(disaster_subcategory_name("0", "01", Language::Zh), "未知");
        assert_eq!(disaster_indicator_name("8", "001", Language::En), "Unknown");
    }

    #[test]
    fn test_source_and_carrier_tables() {
        assert_eq!(source_category_name("0", Language::Zh), "系统内部");
        assert_eq!(source_category_name("1", Language::En), "External interface");
        assert_eq!(source_subcategory_name("06", Language::Zh), "卫星遥感");
        assert_eq!(source_subcategory_name("08", Language::Zh), "未知");
        assert_eq!(carrier_name("1", Language::En), "Image");
        assert_eq!(carrier_name("3", Language::Zh), "视频");
        assert_eq!(carrier_name("4", Language::Zh), "未知");
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(DISASTER_CATEGORIES.entries().len(), 5);
        assert_eq!(SOURCE_SUBCATEGORIES.entries().len(), 7);
        assert_eq!(CARRIERS.entries().len(), 4);
        assert_eq!(DISASTER_SUBCATEGORIES.scopes().len(), 5);
        assert_eq!(DISASTER_INDICATORS.scopes().len(), 5);
        for (category, _) in DISASTER_SUBCATEGORIES.scopes() {
            assert!(DISASTER_CATEGORIES.get(category).is_some());
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }
}
