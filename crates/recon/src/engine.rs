use std::path::Path;

use crate::config::ReconConfig;
use crate::duplicates::find_duplicates;
use crate::error::ReconError;
use crate::evidence::{compute_summary, summarize_side};
use crate::index::KeyIndex;
use crate::load::{load_source, read_source_file};
use crate::matcher::reconcile_indexes;
use crate::model::{ReconMeta, ReconReport, Side, Source};

/// Load both sources named by `config` and reconcile them.
///
/// Relative file paths resolve against `base_dir`. Both files are loaded
/// before anything is compared, so a bad input yields no partial report.
pub fn run(config: &ReconConfig, base_dir: &Path) -> Result<ReconReport, ReconError> {
    let left = load_side(config, Side::Left, base_dir)?;
    let right = load_side(config, Side::Right, base_dir)?;
    Ok(compare(&config.name, &left, &right))
}

/// Read and parse one side of the config.
pub fn load_side(config: &ReconConfig, side: Side, base_dir: &Path) -> Result<Source, ReconError> {
    let label = config.label(side);
    let path = config.resolve_path(side, base_dir);
    log::debug!("{side}: reading '{label}' from {}", path.display());

    let data = read_source_file(label, &path)?;
    load_source(label, &data, &config.columns_for(side), config.delimiter(side))
}

/// Duplicate detection on each source, then cross-file reconciliation.
pub fn compare(name: &str, left: &Source, right: &Source) -> ReconReport {
    let left_index = KeyIndex::build(left);
    let right_index = KeyIndex::build(right);

    let left_duplicates = find_duplicates(left);
    let right_duplicates = find_duplicates(right);

    let reconciliation = reconcile_indexes(&left_index, &right_index);

    let summary = compute_summary(
        summarize_side(left, &left_index, &left_duplicates),
        summarize_side(right, &right_index, &right_duplicates),
        &reconciliation,
    );

    log::info!(
        "{name}: {} exact, {} conflicts, {} only in {}, {} only in {}",
        summary.exact_matches,
        summary.conflicts,
        summary.only_left,
        left.label,
        summary.only_right,
        right.label,
    );

    ReconReport {
        meta: ReconMeta {
            name: name.to_string(),
            left_label: left.label.clone(),
            right_label: right.label.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        left_duplicates,
        right_duplicates,
        reconciliation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn run_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "IP Address,ID Tag,Serial Number\n10.0.0.1,t,s\n");
        write(dir.path(), "b.csv", "IP Address,ID Tag,Serial Number\n10.0.0.1,T,S\n");

        let config = ReconConfig::for_files("a.csv", "b.csv");
        let report = run(&config, dir.path()).unwrap();
        assert_eq!(report.meta.left_label, "A");
        assert_eq!(report.meta.right_label, "B");
        assert_eq!(report.summary.exact_matches, 1);
        assert!(!report.summary.has_findings());
    }

    #[test]
    fn run_fails_when_right_is_missing_a_column() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "IP Address,ID Tag,Serial Number\n10.0.0.1,t,s\n");
        write(dir.path(), "b.csv", "IP Address,Serial Number\n10.0.0.1,s\n");

        let config = ReconConfig::for_files("a.csv", "b.csv");
        let err = run(&config, dir.path()).unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { ref source, .. } if source == "B"));
    }

    #[test]
    fn run_fails_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", "IP Address,ID Tag,Serial Number\n");
        let config = ReconConfig::for_files("a.csv", "missing.csv");
        let err = run(&config, dir.path()).unwrap_err();
        assert!(matches!(err, ReconError::UnreadableSource { .. }));
    }

    #[test]
    fn compare_reports_duplicates_per_side() {
        let mut a = Source::new("A");
        a.push_row(2, "10.0.0.1", "x1", "s1");
        a.push_row(3, "10.0.0.1", "x2", "s2");
        let b = Source::new("B");

        let report = compare("t", &a, &b);
        assert_eq!(report.left_duplicates.len(), 1);
        assert_eq!(report.left_duplicates[0].positions, vec![2, 3]);
        assert!(report.right_duplicates.is_empty());
        assert_eq!(report.summary.only_left, 1);
    }
}
