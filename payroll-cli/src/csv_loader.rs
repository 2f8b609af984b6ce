//! CSV loader for batch pay forms.
//!
//! ## CSV Format
//!
//! One pay form per row. Headers are matched by name, column order does not
//! matter and every column is optional: a missing column is treated as a
//! blank form field. Cells go through the same coercion as interactive input
//! (see [`payroll_core::form`]).
//!
//! | Column             | Notes                                          |
//! |--------------------|------------------------------------------------|
//! | `label`            | Shown in the summary; defaults to `row N`      |
//! | `pay_type`         | `salary` or `hourly`                           |
//! | `gross_amount`     | Per-period gross for salaried rows             |
//! | `pay_frequency`    | `weekly`, `biweekly`, `semimonthly`, ...       |
//! | `hourly_rate`      |                                                |
//! | `regular_hours`    | Blank means 40                                 |
//! | `overtime_hours`   |                                                |
//! | `overtime_rate`    | Blank means 1.5x `hourly_rate`                 |
//! | `filing_status`    | `single`, `married` or `head`                  |
//! | `work_state`       | Full state name                                |
//! | `pre_tax_401k`     | Per period                                     |
//! | `health_insurance` | Per period                                     |
//! | `other_pre_tax`    | Per period                                     |
//!
//! ### Example
//!
//! ```csv
//! label,pay_type,gross_amount,pay_frequency,hourly_rate,filing_status,work_state
//! Alex,salary,5000,monthly,,single,California
//! Sam,hourly,,weekly,25,married,Texas
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use payroll_core::PayForm;

const LABEL_COLUMN: &str = "label";

/// A pay form read from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub label: String,
    pub form: PayForm,
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Structurally invalid CSV (ragged rows, bad quoting, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read pay forms from any reader. Rows are returned in file order.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<BatchRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let label_idx = headers.iter().position(|h| h == LABEL_COLUMN);

    reader
        .records()
        .enumerate()
        .map(|(idx, record)| {
            let record = record?;
            let form: PayForm = record.deserialize(Some(&headers))?;
            let label = label_idx
                .and_then(|i| record.get(i))
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("row {}", idx + 1));
            Ok(BatchRow { label, form })
        })
        .collect()
}

/// Parse CSV text held in memory.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRow>, CsvLoadError> {
    load_from_reader(input.as_bytes())
}

/// Open `path` and parse it.
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRow>, CsvLoadError> {
    let file = File::open(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}
