use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BudgetItem, NewBudgetItem};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for the budget lines that payroll estimates feed into.
#[async_trait]
pub trait BudgetRepository: Send + Sync {
    async fn create_budget_item(
        &self,
        item: NewBudgetItem,
    ) -> Result<BudgetItem, RepositoryError>;

    async fn get_budget_item(&self, id: i64) -> Result<BudgetItem, RepositoryError>;

    async fn list_budget_items(&self) -> Result<Vec<BudgetItem>, RepositoryError>;

    async fn update_budget_item(&self, item: &BudgetItem) -> Result<(), RepositoryError>;

    async fn delete_budget_item(&self, id: i64) -> Result<(), RepositoryError>;

    /// Stores a recurring monthly income line and returns its id.
    async fn record_recurring_income(
        &self,
        name: &str,
        monthly_amount: Decimal,
    ) -> Result<i64, RepositoryError> {
        let item = self
            .create_budget_item(NewBudgetItem::recurring_income(name, monthly_amount))
            .await?;
        Ok(item.id)
    }
}
