//! Versioned payroll reference data.
//!
//! The embedded tables under `data/` are available through
//! [`builtin_tables`]; [`TaxTableLoader::load_dir`] reads the same layout
//! from any directory so new tax years can ship without a rebuild.

mod builtin;
mod loader;

pub use builtin::builtin_tables;
pub use loader::{
    FEDERAL_BRACKETS_FILE, FederalBracketRecord, STATE_RATES_FILE, StateRateRecord,
    TAX_YEAR_CONFIG_FILE, TaxTableLoader, TaxTableLoaderError,
};
