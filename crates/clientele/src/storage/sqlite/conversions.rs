//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use rusqlite::Row;

use clientele_core::customer::Customer;

/// Convert a SQLite row to a Customer.
///
/// Expected columns: id, first_name, last_name
pub fn row_to_customer(row: &Row) -> rusqlite::Result<Customer> {
    let id: i64 = row.get(0)?;
    let first_name: String = row.get(1)?;
    let last_name: String = row.get(2)?;

    Ok(Customer {
        id: Some(id),
        first_name,
        last_name,
    })
}

/// Builds the LIKE pattern for a case-insensitive last-name prefix match.
///
/// The prefix is lowercased to pair with `lower(last_name)` in the query,
/// and `%`, `_` and the escape character itself are escaped so they match
/// literally - a prefix is a string, not a pattern.
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
