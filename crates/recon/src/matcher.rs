use crate::index::{KeyEntry, KeyIndex};
use crate::model::{Conflict, ExactMatch, Reconciliation, Source};

/// Compare two sources by exact key.
pub fn reconcile(left: &Source, right: &Source) -> Reconciliation {
    let left_index = KeyIndex::build(left);
    let right_index = KeyIndex::build(right);
    reconcile_indexes(&left_index, &right_index)
}

/// Compare two prebuilt indexes.
///
/// Shared keys are classified on the last-seen tag and serial of each side.
/// Two blank values compare equal.
pub fn reconcile_indexes(left: &KeyIndex, right: &KeyIndex) -> Reconciliation {
    let mut out = Reconciliation::default();

    for (key, left_entry) in left.iter() {
        match right.get(key) {
            Some(right_entry) => classify(&mut out, key, left_entry, right_entry),
            None => {
                out.only_left.insert(key.to_string());
            }
        }
    }

    for key in right.keys() {
        if !left.contains_key(key) {
            out.only_right.insert(key.to_string());
        }
    }

    out
}

fn classify(out: &mut Reconciliation, key: &str, left: &KeyEntry, right: &KeyEntry) {
    if left.tag == right.tag && left.serial == right.serial {
        out.exact_matches.push(ExactMatch {
            key: key.to_string(),
            left_positions: left.positions.clone(),
            right_positions: right.positions.clone(),
            tag: left.tag.clone(),
            serial: left.serial.clone(),
        });
    } else {
        out.conflicts.push(Conflict {
            key: key.to_string(),
            left_positions: left.positions.clone(),
            right_positions: right.positions.clone(),
            left_tag: left.tag.clone(),
            left_serial: left.serial.clone(),
            right_tag: right.tag.clone(),
            right_serial: right.serial.clone(),
        });
    }
}
