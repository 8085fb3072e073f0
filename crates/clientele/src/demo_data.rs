//! Demo data seeding for local development.

use clientele_core::customer::Customer;
use clientele_core::storage::{CustomerRepository, Result};

/// Seeds a handful of demo customers and logs a few example lookups.
pub async fn seed_demo_customers(repo: &dyn CustomerRepository) -> Result<()> {
    let seed = [
        ("Jack", "Bauer"),
        ("Chloe", "O'Brian"),
        ("Kim", "Bauer"),
        ("David", "Palmer"),
        ("Michelle", "Dessler"),
    ];

    for (first_name, last_name) in seed {
        repo.save(&Customer::new(first_name, last_name)).await?;
    }

    tracing::info!("Customers found with find_all():");
    for customer in repo.find_all().await? {
        tracing::info!(id = customer.id.unwrap_or_default(), name = %customer.name());
    }

    if let Some(customer) = repo.find_by_id(1).await? {
        tracing::info!(name = %customer.name(), "Customer found with find_by_id(1)");
    }

    tracing::info!("Customers found with find_by_last_name(\"Bauer\"):");
    for bauer in repo.find_by_last_name("Bauer").await? {
        tracing::info!(id = bauer.id.unwrap_or_default(), name = %bauer.name());
    }

    Ok(())
}
