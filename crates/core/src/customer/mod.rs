mod types;

pub use types::{Customer, CustomerId};
