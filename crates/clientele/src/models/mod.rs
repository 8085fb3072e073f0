mod customer;

pub use customer::SaveCustomer;
