pub mod calculations;
pub mod db;
pub mod form;
pub mod models;

pub use calculations::{IncomeBasis, PayrollEstimator, monthly_income};
pub use db::repository::{BudgetRepository, RepositoryError};
pub use form::{PayForm, parse_form_number, parse_optional_form_number};
pub use models::*;
