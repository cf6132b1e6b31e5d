use std::collections::HashMap;

use serde::Serialize;

use crate::model::Source;

/// What one source says about a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    pub positions: Vec<usize>,
    /// Tag of the last row carrying this key.
    pub tag: String,
    /// Serial of the last row carrying this key.
    pub serial: String,
}

/// Key → attributes for one source.
///
/// When a key repeats, positions accumulate while tag and serial are taken
/// from the most recent row (last write wins).
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    order: Vec<String>,
    entries: HashMap<String, KeyEntry>,
}

impl KeyIndex {
    pub fn build(source: &Source) -> Self {
        let mut index = KeyIndex::default();
        for record in &source.records {
            match index.entries.get_mut(&record.key) {
                Some(entry) => {
                    entry.positions.push(record.position);
                    entry.tag.clone_from(&record.tag);
                    entry.serial.clone_from(&record.serial);
                }
                None => {
                    index.order.push(record.key.clone());
                    index.entries.insert(
                        record.key.clone(),
                        KeyEntry {
                            positions: vec![record.position],
                            tag: record.tag.clone(),
                            serial: record.serial.clone(),
                        },
                    );
                }
            }
        }
        index
    }

    pub fn get(&self, key: &str) -> Option<&KeyEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in order of first occurrence.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in order of first occurrence.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyEntry)> {
        self.order
            .iter()
            .filter_map(|k| self.entries.get(k).map(|e| (k.as_str(), e)))
    }
}
