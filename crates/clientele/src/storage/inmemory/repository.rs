//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use clientele_core::customer::{Customer, CustomerId};
use clientele_core::storage::{CustomerRepository, Result};

/// In-memory storage backend.
///
/// Uses a `BTreeMap` wrapped in `Arc<RwLock<_>>` for thread-safe access;
/// the ordered map keeps `find_all` sorted by id like the SQLite backend.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    customers: Arc<RwLock<BTreeMap<CustomerId, Customer>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            customers: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRepository {
    async fn save(&self, customer: &Customer) -> Result<Customer> {
        let mut customers = self.customers.write().await;

        // Allocating past the highest existing id keeps inserts from
        // colliding with ids that arrived via upsert.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        let second = repo.save(&Customer::new("Kim", "Bauer")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_with_id_upserts() {
        let repo = InMemoryRepository::new();

        let created = repo
            .save(&Customer::new("Tony", "Almeida").with_id(10))
            .await
            .unwrap();
        assert_eq!(created.id, Some(10));

        let overwritten = repo
            .save(&Customer::new("Michelle", "Dessler").with_id(10))
            .await
            .unwrap();
        assert_eq!(overwritten.id, Some(10));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "Michelle");
    }

    #[tokio::test]
    async fn test_ids_allocated_past_upserted_id() {
        let repo = InMemoryRepository::new();

        repo.save(&Customer::new("Tony", "Almeida").with_id(10))
            .await
            .unwrap();
        let next = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();

        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn test_find_by_last_name_is_case_sensitive() {
        let repo = InMemoryRepository::new();

        repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        repo.save(&Customer::new("Kim", "Bauer")).await.unwrap();
        repo.save(&Customer::new("Chloe", "O'Brian")).await.unwrap();

        let bauers = repo.find_by_last_name("Bauer").await.unwrap();
        assert_eq!(bauers.len(), 2);

        let lowercase = repo.find_by_last_name("bauer").await.unwrap();
        assert!(lowercase.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_last_name_starts_with_ignores_case() {
        let repo = InMemoryRepository::new();

        repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        repo.save(&Customer::new("Kim", "Bauer")).await.unwrap();

        let bauers = repo.find_by_last_name_starts_with("ba").await.unwrap();
        assert_eq!(bauers.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_is_a_no_op_when_absent() {
        let repo = InMemoryRepository::new();

        let saved = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        let id = saved.id.unwrap();

        repo.delete_by_id(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());

        // Deleting again is still Ok
        repo.delete_by_id(id).await.unwrap();
    }
}
