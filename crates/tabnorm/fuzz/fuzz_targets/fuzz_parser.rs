//! Fuzz target for the data parser and cleaner.
//!
//! This fuzzer tests that parsing and cleaning:
//! 1. Never panic on malformed input
//! 2. Always yield rows as wide as the header
//! 3. Always yield unique column names after cleaning

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use tabnorm::input::clean_table;
use tabnorm::{CleaningConfig, Parser, ParserConfig};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::with_config(ParserConfig::default().with_max_rows(1_000));
    let Ok(table) = parser.parse_bytes(data) else {
        return;
    };
    for row in &table.rows {
        assert_eq!(row.len(), table.column_count());
    }

    let cleaned = clean_table(&table, &CleaningConfig::default());
    let unique: HashSet<&String> = cleaned.headers.iter().collect();
    assert_eq!(unique.len(), cleaned.headers.len());
});
