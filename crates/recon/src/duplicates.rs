use std::collections::HashMap;

use crate::model::{DuplicateKey, Source};

/// Keys that occur on two or more rows of `source`, with every position.
///
/// Keys are reported in order of first occurrence.
pub fn find_duplicates(source: &Source) -> Vec<DuplicateKey> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<DuplicateKey> = Vec::new();

    for record in &source.records {
        let slot = *slots.entry(record.key.as_str()).or_insert_with(|| {
            groups.push(DuplicateKey {
                key: record.key.clone(),
                positions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].positions.push(record.position);
    }

    groups.retain(|g| g.positions.len() > 1);

    if !groups.is_empty() {
        log::debug!("{}: {} duplicate key(s)", source.label, groups.len());
    }
    groups
}
