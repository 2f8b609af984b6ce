use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repository::{BudgetRepository, RepositoryError};

/// Backend-agnostic connection configuration.
///
/// `backend` must match the [`RepositoryFactory::backend_name`] of a
/// registered factory. `connection_string` is passed through unchanged.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `budget.db`, `:memory:`             |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "budget.db".to_string(),
        }
    }
}

/// One implementation per storage backend, registered with a
/// [`RepositoryRegistry`] at startup.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Open (or create) the store and return a ready-to-use repository.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn BudgetRepository>, RepositoryError>;
}

/// Registry of [`RepositoryFactory`] instances, keyed by backend name.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no factory is registered for
    ///   the requested backend.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn BudgetRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BudgetItem, BudgetItemType, NewBudgetItem};

    /// In-memory repository used to exercise the registry and the default
    /// `record_recurring_income` method.
    #[derive(Default)]
    struct MemoryRepository {
        next_id: AtomicI64,
        items: Mutex<Vec<BudgetItem>>,
    }

    #[async_trait]
    impl BudgetRepository for MemoryRepository {
        async fn create_budget_item(
            &self,
            item: NewBudgetItem,
        ) -> Result<BudgetItem, RepositoryError> {
            let now = Utc::now();
            let created = BudgetItem {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                name: item.name,
                amount: item.amount,
                item_type: item.item_type,
                recurring: item.recurring,
                created_at: now,
                updated_at: now,
            };
            self.items.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn get_budget_item(&self, id: i64) -> Result<BudgetItem, RepositoryError> {
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or(RepositoryError::NotFound)
        }

        async fn list_budget_items(&self) -> Result<Vec<BudgetItem>, RepositoryError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn update_budget_item(&self, _item: &BudgetItem) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn delete_budget_item(&self, _id: i64) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    struct MemoryFactory;

    #[async_trait]
    impl RepositoryFactory for MemoryFactory {
        fn backend_name(&self) -> &'static str {
            "memory"
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn BudgetRepository>, RepositoryError> {
            Ok(Box::new(MemoryRepository::default()))
        }
    }

    fn memory_config() -> DbConfig {
        DbConfig {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }

    #[test]
    fn available_backends_is_sorted() {
        struct Named(&'static str);

        #[async_trait]
        impl RepositoryFactory for Named {
            fn backend_name(&self) -> &'static str {
                self.0
            }

            async fn create(
                &self,
                _config: &DbConfig,
            ) -> Result<Box<dyn BudgetRepository>, RepositoryError> {
                Err(RepositoryError::Connection("unused".to_string()))
            }
        }

        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(Named("sqlite")));
        registry.register(Box::new(Named("memory")));

        assert_eq!(registry.available_backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn create_rejects_unknown_backend() {
        let registry = RepositoryRegistry::new();

        let result = registry.create(&DbConfig::default()).await;

        assert!(matches!(result, Err(RepositoryError::Configuration(msg)) if msg.contains("sqlite")));
    }

    #[tokio::test]
    async fn create_dispatches_to_registered_factory() {
        let mut registry = RepositoryRegistry::new();
        registry.register(Box::new(MemoryFactory));

        let repo = registry.create(&memory_config()).await.expect("memory backend");

        assert!(repo.list_budget_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_recurring_income_creates_monthly_income_item() {
        let repo = MemoryRepository::default();

        let id = repo
            .record_recurring_income("Paycheck (net)", dec!(3567.25))
            .await
            .expect("record income");

        let item = repo.get_budget_item(id).await.expect("item exists");
        assert_eq!(item.name, "Paycheck (net)");
        assert_eq!(item.amount, dec!(3567.25));
        assert_eq!(item.item_type, BudgetItemType::Income);
        assert!(item.recurring);
    }
}
