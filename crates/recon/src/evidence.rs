use crate::index::KeyIndex;
use crate::model::{DuplicateKey, Reconciliation, ReconSummary, SideSummary, Source};

/// Per-side counts for one loaded source.
pub fn summarize_side(source: &Source, index: &KeyIndex, duplicates: &[DuplicateKey]) -> SideSummary {
    SideSummary {
        rows: source.len(),
        blank_keys: source.blank_keys,
        distinct_keys: index.len(),
        duplicate_keys: duplicates.len(),
    }
}

/// Compute summary statistics from the reconciliation.
pub fn compute_summary(left: SideSummary, right: SideSummary, recon: &Reconciliation) -> ReconSummary {
    ReconSummary {
        left,
        right,
        exact_matches: recon.exact_matches.len(),
        conflicts: recon.conflicts.len(),
        only_left: recon.only_left.len(),
        only_right: recon.only_right.len(),
    }
}
