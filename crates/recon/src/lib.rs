//! `inventory-recon` — two-file inventory reconciliation engine.
//!
//! Loads two device lists keyed by IP address, reports keys repeated within
//! each file, and classifies keys across files as exact matches, conflicts,
//! or present on one side only. No CLI or formatting dependencies.

pub mod config;
pub mod duplicates;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod index;
pub mod load;
pub mod matcher;
pub mod model;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ReconReport, Reconciliation, Side, Source};
