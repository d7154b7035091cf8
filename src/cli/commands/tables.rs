//! `tables` command: print every code table

use super::shared::print_json;
use crate::cli::args::OutputFormat;
use crate::codes::{
    CARRIERS, CodeTable, DISASTER_CATEGORIES, DISASTER_INDICATORS, DISASTER_SUBCATEGORIES,
    Language, SOURCE_CATEGORIES, SOURCE_SUBCATEGORIES, ScopedCodeTable,
};
use anyhow::Result;
use colored::*;
use serde_json::{Map, Value, json};

fn table_json(table: &CodeTable) -> Value {
    let entries: Map<String, Value> = table
        .entries()
        .iter()
        .map(|entry| (entry.code.to_string(), json!({ "zh": entry.zh, "en": entry.en })))
        .collect();
    Value::Object(entries)
}

fn scoped_json(table: &ScopedCodeTable) -> Value {
    let scopes: Map<String, Value> = table
        .scopes()
        .iter()
        .map(|(category, inner)| (category.to_string(), table_json(inner)))
        .collect();
    Value::Object(scopes)
}

fn print_table(table: &CodeTable, language: Language, indent: &str) {
    for entry in table.entries() {
        println!("{}{:<4} {}", indent, entry.code.bright_white(), entry.label(language));
    }
}

pub fn run_tables(language: Language, format: OutputFormat) -> Result<()> {
    let flat = [&DISASTER_CATEGORIES, &SOURCE_CATEGORIES, &SOURCE_SUBCATEGORIES, &CARRIERS];
    let scoped = [&DISASTER_SUBCATEGORIES, &DISASTER_INDICATORS];

    match format {
        OutputFormat::Json => {
            let mut tables = Map::new();
            for table in flat {
                tables.insert(table.name().to_string(), table_json(table));
            }
            for table in scoped {
                tables.insert(table.name().to_string(), scoped_json(table));
            }
            print_json(&Value::Object(tables))?;
        }
        OutputFormat::Text => {
            for table in flat {
                println!("{}", table.name().bright_green().bold());
                print_table(table, language, "  ");
                println!();
            }
            for table in scoped {
                println!("{}", table.name().bright_green().bold());
                for (category, inner) in table.scopes() {
                    println!(
                        "  {} {}",
                        category.bright_cyan(),
                        DISASTER_CATEGORIES.resolve(category, language).bright_cyan()
                    );
                    print_table(inner, language, "    ");
                }
                println!();
            }
        }
    }
    Ok(())
}
