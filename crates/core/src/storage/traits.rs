use async_trait::async_trait;

use crate::customer::{Customer, CustomerId};

use super::Result;

/// Repository for customer records.
///
/// Implementations provide no locking beyond the backing store's own
/// concurrency control; concurrent saves to the same id are last-write-wins.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persists a customer.
    ///
    /// When `customer.id` is `None` a new row is inserted and the returned
    /// record carries the store-assigned id. When it is `Some`, the row with
    /// that id is overwritten, or created with that exact id if absent.
    async fn save(&self, customer: &Customer) -> Result<Customer>;

    /// Gets all customers, ordered by id.
    async fn find_all(&self) -> Result<Vec<Customer>>;

    /// Gets a customer by id.
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Deletes a customer by id. Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: CustomerId) -> Result<()>;

    /// Gets all customers whose last name matches exactly (case-sensitive).
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>>;

    /// Gets all customers whose last name starts with the given prefix,
    /// compared case-insensitively.
    async fn find_by_last_name_starts_with(&self, prefix: &str) -> Result<Vec<Customer>>;
}
