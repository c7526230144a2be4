//! Fuzz target for dependency discovery, key search and synthesis.
//!
//! Builds a small table from arbitrary cells and checks that every
//! discovered dependency holds and that the decomposition covers the table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabnorm::discovery::violated_dependencies;
use tabnorm::{AttrSet, DataTable, FdDiscoverer, KeyConfig, Schema, find_keys, synthesize};

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    cells: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let cols = usize::from(input.columns % 6) + 1;
    if input.cells.len() < cols || input.cells.len() > 4_096 {
        return;
    }

    let headers: Vec<String> = (0..cols).map(|i| format!("c{i}")).collect();
    let rows: Vec<Vec<String>> = input
        .cells
        .chunks_exact(cols)
        .map(|chunk| chunk.iter().map(|b| (b % 4).to_string()).collect())
        .collect();
    let table = DataTable::from_records(headers, rows);

    let schema = Schema::from_table(&table).unwrap();
    let fds = FdDiscoverer::new().discover(&table).unwrap();
    assert!(violated_dependencies(&table, &fds).is_empty());

    let keys = find_keys(&schema, &fds, &KeyConfig::default().with_max_key_size(cols)).unwrap();
    assert!(!keys.is_empty());

    let decomposition = synthesize(&table, &schema, &fds, &keys);
    let mut covered = AttrSet::new();
    for relation in &decomposition.relations {
        covered.union_with(&schema.resolve(&relation.attributes, "fuzz").unwrap());
    }
    assert_eq!(covered, schema.all());
});
