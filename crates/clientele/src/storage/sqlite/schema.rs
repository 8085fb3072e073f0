//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Customers table
CREATE TABLE IF NOT EXISTS customers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL
);

-- Index for last-name lookups
CREATE INDEX IF NOT EXISTS idx_customers_last_name ON customers(last_name);
"#;

pub const INSERT_CUSTOMER: &str = r#"
INSERT INTO customers (first_name, last_name)
VALUES (?1, ?2)
"#;

/// Writes a row at a client-specified id, overwriting any existing row.
pub const UPSERT_CUSTOMER: &str = r#"
INSERT INTO customers (id, first_name, last_name)
VALUES (?1, ?2, ?3)
ON CONFLICT(id) DO UPDATE SET first_name = excluded.first_name, last_name = excluded.last_name
"#;

pub const SELECT_CUSTOMER_BY_ID: &str = r#"
SELECT id, first_name, last_name
FROM customers
WHERE id = ?1
"#;

pub const SELECT_ALL_CUSTOMERS: &str = r#"
SELECT id, first_name, last_name
FROM customers
ORDER BY id
"#;

pub const SELECT_CUSTOMERS_BY_LAST_NAME: &str = r#"
SELECT id, first_name, last_name
FROM customers
WHERE last_name = ?1
ORDER BY id
"#;

/// Case-insensitive prefix match; the parameter is a LIKE pattern built by
/// `conversions::like_prefix_pattern`.
pub const SELECT_CUSTOMERS_BY_LAST_NAME_PREFIX: &str = r#"
SELECT id, first_name, last_name
FROM customers
WHERE lower(last_name) LIKE ?1 ESCAPE '\'
ORDER BY id
"#;

pub const DELETE_CUSTOMER: &str = r#"
DELETE FROM customers
WHERE id = ?1
"#;
