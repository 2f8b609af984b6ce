//! `paycalc` configuration file.
//!
//! Every key is optional. Command-line flags override the file and the file
//! overrides the built-in defaults.
//!
//! ```toml
//! tax_year = 2024
//! tables_dir = "tables"
//!
//! [database]
//! backend = "sqlite"
//! connection_string = "budget.db"
//!
//! [logging]
//! level = "debug"
//! file = "paycalc.log"
//!
//! [budget]
//! basis = "net"
//! ```

use std::path::{Path, PathBuf};

use payroll_core::IncomeBasis;
use payroll_core::db::DbConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub basis: IncomeBasis,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaycalcConfig {
    /// Tax year to estimate against; the latest available year when unset.
    pub tax_year: Option<i32>,
    /// Directory of table CSV files replacing the embedded tables.
    pub tables_dir: Option<PathBuf>,
    pub database: DbConfig,
    pub logging: LoggingConfig,
    pub budget: BudgetConfig,
}

impl PaycalcConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = PaycalcConfig::from_toml_str("").expect("empty config parses");

        assert_eq!(config, PaycalcConfig::default());
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.budget.basis, IncomeBasis::Net);
    }

    #[test]
    fn full_file_is_read() {
        let config = PaycalcConfig::from_toml_str(
            r#"
            tax_year = 2024
            tables_dir = "tables"

            [database]
            connection_string = ":memory:"

            [logging]
            level = "debug"
            file = "paycalc.log"

            [budget]
            basis = "gross"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.tax_year, Some(2024));
        assert_eq!(config.tables_dir, Some(PathBuf::from("tables")));
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.database.connection_string, ":memory:");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("paycalc.log")));
        assert_eq!(config.budget.basis, IncomeBasis::Gross);
    }

    #[test]
    fn unknown_basis_is_rejected() {
        let result = PaycalcConfig::from_toml_str("[budget]\nbasis = \"take-home\"\n");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let result = PaycalcConfig::load(Path::new("does/not/exist.toml"));

        assert!(matches!(result, Err(ConfigError::Io { path, .. }) if path.ends_with("exist.toml")));
    }
}
