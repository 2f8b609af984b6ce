use async_trait::async_trait;
use chrono::{DateTime, Utc};
use payroll_core::{BudgetItem, BudgetItemType, BudgetRepository, NewBudgetItem, RepositoryError};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::debug;

use crate::decimal::{decimal_to_text, get_decimal};

const SELECT_BUDGET_ITEM: &str = "SELECT id, name, amount, item_type, recurring, created_at, updated_at
     FROM budget_items";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn row_to_budget_item(row: &SqliteRow) -> Result<BudgetItem, RepositoryError> {
    let item_type: String = row.try_get("item_type").map_err(db_err)?;
    let item_type = BudgetItemType::parse(&item_type)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid item type: {}", item_type)))?;

    Ok(BudgetItem {
        id: row.try_get("id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        amount: get_decimal(row, "amount")?,
        item_type,
        recurring: row.try_get("recurring").map_err(db_err)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}

#[async_trait]
impl BudgetRepository for SqliteRepository {
    async fn create_budget_item(
        &self,
        item: NewBudgetItem,
    ) -> Result<BudgetItem, RepositoryError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO budget_items (name, amount, item_type, recurring, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.name)
        .bind(decimal_to_text(item.amount))
        .bind(item.item_type.as_str())
        .bind(item.recurring)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();
        debug!(id, name = %item.name, amount = %item.amount, "created budget item");

        self.get_budget_item(id).await
    }

    async fn get_budget_item(
        &self,
        id: i64,
    ) -> Result<BudgetItem, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_BUDGET_ITEM} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_budget_item(&row)
    }

    async fn list_budget_items(&self) -> Result<Vec<BudgetItem>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_BUDGET_ITEM} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_budget_item).collect()
    }

    async fn update_budget_item(
        &self,
        item: &BudgetItem,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE budget_items
             SET name = ?, amount = ?, item_type = ?, recurring = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&item.name)
        .bind(decimal_to_text(item.amount))
        .bind(item.item_type.as_str())
        .bind(item.recurring)
        .bind(Utc::now())
        .bind(item.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_budget_item(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM budget_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
