//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                                   |
//! |---------|-----------|-----------------------------------------------|
//! | 0       | Universal | Success                                       |
//! | 1       | Recon     | Findings present (only with --fail-on-findings) |
//! | 2       | Universal | CLI usage error (raised by clap)              |
//! | 3-9     | Recon     | Config, input, and output failures            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into [`recon_exit_code`] or the command that raises it

use inventory_recon::ReconError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

// =============================================================================
// Recon (1, 3-9)
// =============================================================================

/// Duplicates, conflicts, or one-sided keys were found.
/// Like `diff(1)`, exit 1 means "inputs differ".
pub const EXIT_FINDINGS: u8 = 1;

/// Config file unreadable, not TOML, or failed validation.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// An input lacks one of the required key/tag/serial columns.
pub const EXIT_MISSING_COLUMN: u8 = 4;

/// An input file is missing, unreadable, or malformed.
pub const EXIT_UNREADABLE_SOURCE: u8 = 5;

/// The report could not be serialized or written.
pub const EXIT_OUTPUT: u8 = 6;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        ReconError::UnreadableSource { .. } => EXIT_UNREADABLE_SOURCE,
    }
}
