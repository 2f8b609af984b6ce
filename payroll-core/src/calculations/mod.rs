//! Payroll calculations.
//!
//! [`PayrollEstimator`] turns a [`crate::PaySpec`] into a gross-to-net
//! [`crate::PayrollResult`] against one year of reference tables, and
//! [`monthly_income`] converts that result into the monthly amount stored
//! in the budget.

pub mod budget;
pub mod common;
pub mod payroll;

pub use budget::{IncomeBasis, monthly_income};
pub use payroll::PayrollEstimator;

#[cfg(test)]
pub(crate) mod fixtures;
