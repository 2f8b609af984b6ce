use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetItemType {
    Income,
    Expense,
}

impl BudgetItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

/// A monthly budget line held by the budget store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: i64,
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
    pub item_type: BudgetItemType,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new budget items (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBudgetItem {
    pub name: String,
    pub amount: Decimal,
    pub item_type: BudgetItemType,
    pub recurring: bool,
}

impl NewBudgetItem {
    pub fn recurring_income(
        name: impl Into<String>,
        monthly_amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount: monthly_amount,
            item_type: BudgetItemType::Income,
            recurring: true,
        }
    }
}
