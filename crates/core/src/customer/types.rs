use serde::{Deserialize, Serialize};

/// Identifier assigned by the backing store on first insert.
pub type CustomerId = i64;

/// A customer record.
///
/// `id` is `None` until the record has been persisted; the store assigns it
/// on the first save and it is never reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    /// Creates a new, not-yet-persisted customer.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Sets a specific ID for this customer (useful for testing).
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Full name, first and last joined with a single space.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Sets first and last name from a full name.
    ///
    /// Splits on the first space: everything after it (possibly nothing)
    /// becomes the last name, so "Joe W. Smith" yields ("Joe", "W. Smith")
    /// and "Cher" yields ("Cher", "").
    pub fn set_name(&mut self, name: &str) {
        match name.split_once(' ') {
            Some((first, rest)) => {
                self.first_name = first.to_string();
                self.last_name = rest.to_string();
            }
            None => {
                self.first_name = name.to_string();
                self.last_name = String::new();
            }
        }
    }
}
