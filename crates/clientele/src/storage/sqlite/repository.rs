//! SQLite repository implementation.
//!
//! Implements the repository trait from `clientele_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use clientele_core::customer::{Customer, CustomerId};
use clientele_core::storage::{CustomerRepository, RepositoryError, Result};

use super::conversions::{like_prefix_pattern, row_to_customer};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Provides async access to the customers table.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl CustomerRepository for SqliteRepository {
    async fn save(&self, customer: &Customer) -> Result<Customer> {
        let first_name = customer.first_name.clone();
        let last_name = customer.last_name.clone();

        match customer.id {
            // New record: let the store assign the id
            None => {
                let id = self
                    .conn
                    .call(move |conn| {
                        conn.execute(
                            schema::INSERT_CUSTOMER,
                            rusqlite::params![first_name, last_name],
                        )
                        .map_err(wrap_err)?;
                        Ok(conn.last_insert_rowid())
                    })
                    .await
                    .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

                Ok(Customer {
                    id: Some(id),
                    ..customer.clone()
                })
            }
            // Known id: overwrite the row, creating it if absent
            Some(id) => {
                self.conn
                    .call(move |conn| {
                        conn.execute(
                            schema::UPSERT_CUSTOMER,
                            rusqlite::params![id, first_name, last_name],
                        )
                        .map_err(wrap_err)?;
                        Ok(())
                    })
                    .await
                    .map_err(|e| map_tokio_rusqlite_error(e, "Customer", id))?;

                Ok(customer.clone())
            }
        }
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_CUSTOMERS)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_customer).map_err(wrap_err)?;

                let mut customers = Vec::new();
                for row_result in rows {
                    customers.push(row_result.map_err(wrap_err)?);
                }
                Ok(customers)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CUSTOMER_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([id], row_to_customer) {
                    Ok(customer) => Ok(Some(customer)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Customer", id))
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<()> {
        // Zero affected rows is fine: deleting an absent id is a no-op
        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_CUSTOMER, [id]).map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Customer", id))
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>> {
        let last_name = last_name.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CUSTOMERS_BY_LAST_NAME)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&last_name], row_to_customer)
                    .map_err(wrap_err)?;

                let mut customers = Vec::new();
                for row_result in rows {
                    customers.push(row_result.map_err(wrap_err)?);
                }
                Ok(customers)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn find_by_last_name_starts_with(&self, prefix: &str) -> Result<Vec<Customer>> {
        let pattern = like_prefix_pattern(prefix);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CUSTOMERS_BY_LAST_NAME_PREFIX)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&pattern], row_to_customer)
                    .map_err(wrap_err)?;

                let mut customers = Vec::new();
                for row_result in rows {
                    customers.push(row_result.map_err(wrap_err)?);
                }
                Ok(customers)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_assigns_id_and_roundtrips() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let saved = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        let id = saved.id.expect("store should assign an id");

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Jack");
        assert_eq!(found.last_name, "Bauer");
    }

    #[tokio::test]
    async fn test_save_with_id_creates_missing_row() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let saved = repo
            .save(&Customer::new("Tony", "Almeida").with_id(86))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(86));

        let found = repo.find_by_id(86).await.unwrap().unwrap();
        assert_eq!(found.first_name, "Tony");
    }

    #[tokio::test]
    async fn test_save_with_existing_id_overwrites() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let saved = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        let id = saved.id.unwrap();

        repo.save(&Customer::new("Jack", "Brauer").with_id(id))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].last_name, "Brauer");
    }

    #[tokio::test]
    async fn test_ids_allocated_past_upserted_id() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.save(&Customer::new("Tony", "Almeida").with_id(10))
            .await
            .unwrap();
        let next = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();

        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.save(&Customer::new("Kim", "Bauer").with_id(3))
            .await
            .unwrap();
        repo.save(&Customer::new("Jack", "Bauer").with_id(1))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].id, Some(1));
        assert_eq!(all[1].id, Some(3));
    }

    #[tokio::test]
    async fn test_find_by_last_name_is_case_sensitive() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

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
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        repo.save(&Customer::new("Kim", "Bauer")).await.unwrap();
        repo.save(&Customer::new("David", "Palmer")).await.unwrap();

        let bauers = repo.find_by_last_name_starts_with("ba").await.unwrap();
        assert_eq!(bauers.len(), 2);

        let palmers = repo.find_by_last_name_starts_with("PAL").await.unwrap();
        assert_eq!(palmers.len(), 1);
    }

    #[tokio::test]
    async fn test_prefix_wildcards_match_literally() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.save(&Customer::new("Percy", "100%")).await.unwrap();
        repo.save(&Customer::new("Xavier", "100x")).await.unwrap();

        let matches = repo.find_by_last_name_starts_with("100%").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].last_name, "100%");
    }

    #[tokio::test]
    async fn test_delete_is_a_no_op_when_absent() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        let saved = repo.save(&Customer::new("Jack", "Bauer")).await.unwrap();
        let id = saved.id.unwrap();

        repo.delete_by_id(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());

        // Deleting again is still Ok
        repo.delete_by_id(id).await.unwrap();
    }
}
