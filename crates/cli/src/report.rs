// Human-readable rendering of a reconciliation report.
// Six sections in fixed order; only the one-sided key lists are sorted.

use std::io::{self, Write};

use inventory_recon::model::{Conflict, DuplicateKey, ExactMatch, ReconReport};

/// Write all six report sections.
pub fn render_text<W: Write>(report: &ReconReport, out: &mut W) -> io::Result<()> {
    let left = report.meta.left_label.as_str();
    let right = report.meta.right_label.as_str();
    let recon = &report.reconciliation;

    write_duplicates(out, left, &report.left_duplicates)?;
    writeln!(out)?;
    write_duplicates(out, right, &report.right_duplicates)?;
    writeln!(out)?;

    write_only(out, left, right, recon.only_left.iter())?;
    writeln!(out)?;
    write_only(out, right, left, recon.only_right.iter())?;
    writeln!(out)?;

    writeln!(out, "=== CROSS-FILE EXACT MATCHES (SAME IP, SAME ID, SAME SERIAL) ===")?;
    if recon.exact_matches.is_empty() {
        writeln!(out, "No exact matches across files.")?;
    }
    for m in &recon.exact_matches {
        write_exact(out, left, right, m)?;
    }
    writeln!(out)?;

    writeln!(out, "=== CROSS-FILE POTENTIAL CONFLICTS (SAME IP, DIFFERENT ID OR SERIAL) ===")?;
    if recon.conflicts.is_empty() {
        writeln!(out, "No mismatches across files.")?;
    }
    for c in &recon.conflicts {
        write_conflict(out, left, right, c)?;
    }

    Ok(())
}

/// One-line count summary for stderr.
pub fn summary_line(report: &ReconReport) -> String {
    let s = &report.summary;
    format!(
        "{}: {} exact, {} conflicts, {} only in {}, {} only in {}, duplicates {}/{}",
        report.meta.name,
        s.exact_matches,
        s.conflicts,
        s.only_left,
        report.meta.left_label,
        s.only_right,
        report.meta.right_label,
        s.left.duplicate_keys,
        s.right.duplicate_keys,
    )
}

fn rows(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_duplicates<W: Write>(out: &mut W, label: &str, dups: &[DuplicateKey]) -> io::Result<()> {
    writeln!(out, "=== DUPLICATE IPs *WITHIN* {} ===", label.to_uppercase())?;
    if dups.is_empty() {
        return writeln!(out, "No duplicate IPs found within {label}.");
    }
    for d in dups {
        writeln!(out, "IP: {:<15}  Rows: {}", d.key, rows(&d.positions))?;
    }
    Ok(())
}

fn write_only<'a, W: Write>(
    out: &mut W,
    this: &str,
    other: &str,
    keys: impl Iterator<Item = &'a String>,
) -> io::Result<()> {
    writeln!(
        out,
        "=== IPs IN {} BUT *NOT* IN {} ===",
        this.to_uppercase(),
        other.to_uppercase()
    )?;
    let mut any = false;
    for key in keys {
        any = true;
        writeln!(out, "IP: {key}")?;
    }
    if !any {
        writeln!(out, "No IPs are exclusive to {this}.")?;
    }
    Ok(())
}

fn write_exact<W: Write>(out: &mut W, left: &str, right: &str, m: &ExactMatch) -> io::Result<()> {
    writeln!(
        out,
        "IP: {:<15}  {left} Rows: {:<6}  {right} Rows: {:<6}  ID Tag: {:<10}  Serial: {}",
        m.key,
        rows(&m.left_positions),
        rows(&m.right_positions),
        m.tag,
        m.serial,
    )
}

fn write_conflict<W: Write>(out: &mut W, left: &str, right: &str, c: &Conflict) -> io::Result<()> {
    writeln!(
        out,
        "IP: {:<15}  {left} Rows: {:<6}  ID Tag: {:<10}  Serial: {:<12}  {right} Rows: {:<6}  ID Tag: {:<10}  Serial: {}",
        c.key,
        rows(&c.left_positions),
        c.left_tag,
        c.left_serial,
        rows(&c.right_positions),
        c.right_tag,
        c.right_serial,
    )
}
