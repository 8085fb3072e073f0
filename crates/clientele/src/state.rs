//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds the customer repository as a trait object so
//! the storage backend can be swapped via feature flags.

use std::sync::Arc;

use clientele_core::storage::CustomerRepository;

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler and contains the repository
/// trait object for database access.
#[derive(Clone)]
pub struct AppState {
    /// Customer repository backed by the configured storage backend.
    pub customer_repo: Arc<dyn CustomerRepository>,
}

impl AppState {
    /// Creates a new AppState with the given repository.
    fn build(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            Ok(Self::build(repo))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for local development without any external dependencies.
        pub async fn new(_config: &Config) -> Result<Self, anyhow::Error> {
            Ok(Self::build(Arc::new(InMemoryRepository::new())))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;

    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use clientele_core::customer::{Customer, CustomerId};
    use clientele_core::storage::Result;

    /// Minimal in-memory repository for tests.
    #[derive(Debug, Default)]
    struct TestRepository {
        customers: RwLock<BTreeMap<CustomerId, Customer>>,
    }

    #[async_trait]
    impl CustomerRepository for TestRepository {
        async fn save(&self, customer: &Customer) -> Result<Customer> {
            let mut customers = self.customers.write().await;
            let id = match customer.id {
                Some(id) => id,
                None => customers.keys().next_back().map_or(1, |last| last + 1),
            };
            let saved = Customer {
                id: Some(id),
                ..customer.clone()
            };
            customers.insert(id, saved.clone());
            Ok(saved)
        }

        async fn find_all(&self) -> Result<Vec<Customer>> {
            let customers = self.customers.read().await;
            Ok(customers.values().cloned().collect())
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
            let customers = self.customers.read().await;
            Ok(customers.get(&id).cloned())
        }

        async fn delete_by_id(&self, id: CustomerId) -> Result<()> {
            let mut customers = self.customers.write().await;
            customers.remove(&id);
            Ok(())
        }

        async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>> {
            let customers = self.customers.read().await;
            Ok(customers
                .values()
                .filter(|c| c.last_name == last_name)
                .cloned()
                .collect())
        }

        async fn find_by_last_name_starts_with(&self, prefix: &str) -> Result<Vec<Customer>> {
            let prefix = prefix.to_lowercase();
            let customers = self.customers.read().await;
            Ok(customers
                .values()
                .filter(|c| c.last_name.to_lowercase().starts_with(&prefix))
                .cloned()
                .collect())
        }
    }

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        fn default() -> Self {
            Self::build(Arc::new(TestRepository::default()))
        }
    }
}
