//! Customer CRUD handlers.
//!
//! These handlers use the repository trait object for database access and
//! translate its results to HTTP status codes and JSON payloads.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use clientele_core::customer::{Customer, CustomerId};
use clientele_core::storage::RepositoryError;

use crate::{handlers::AppError, models::SaveCustomer, state::AppState};

/// Query parameters for listing customers.
#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    /// Exact last name to filter by (optional).
    #[serde(rename = "last-name")]
    pub last_name: Option<String>,
}

/// Query parameters for the prefix search.
#[derive(Debug, Deserialize)]
pub struct SearchCustomersQuery {
    /// Last-name prefix, matched case-insensitively (required).
    #[serde(rename = "last-name")]
    pub last_name: String,
}

/// List customers (GET /customers).
///
/// With a `last-name` query parameter, returns the customers whose last
/// name matches exactly (case-sensitive); without it, returns all customers.
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = match query.last_name {
        Some(last_name) => state.customer_repo.find_by_last_name(&last_name).await?,
        None => state.customer_repo.find_all().await?,
    };

    Ok(Json(customers))
}

/// Search customers by last-name prefix (GET /customers/search).
pub async fn search_customers(
    State(state): State<AppState>,
    Query(query): Query<SearchCustomersQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state
        .customer_repo
        .find_by_last_name_starts_with(&query.last_name)
        .await?;

    Ok(Json(customers))
}

/// Get a single customer by ID (GET /customers/{id}).
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .customer_repo
        .find_by_id(id)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity_type: "Customer",
            id,
        })?;

    Ok(Json(customer))
}

/// Create a new customer (POST /customers).
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<SaveCustomer>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.customer_repo.save(&payload.into_customer()).await?;

    if let Some(id) = created.id {
        tracing::info!(customer_id = id, "Created new customer");
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace or create a customer at an ID (PUT /customers/{id}).
///
/// When the id exists the record is updated in place and 200 is returned.
/// When it does not, the record is created with the path id and the response
/// is 201. The create-on-missing behavior is part of the public contract.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<SaveCustomer>,
) -> Result<impl IntoResponse, AppError> {
    match state.customer_repo.find_by_id(id).await? {
        Some(mut customer) => {
            customer.first_name = payload.first_name;
            customer.last_name = payload.last_name;
            let updated = state.customer_repo.save(&customer).await?;

            tracing::info!(customer_id = id, "Updated customer");

            Ok((StatusCode::OK, Json(updated)))
        }
        None => {
            let created = state
                .customer_repo
                .save(&payload.into_customer().with_id(id))
                .await?;

            tracing::info!(customer_id = id, "Created customer at requested id");

            Ok((StatusCode::CREATED, Json(created)))
        }
    }
}

/// Delete a customer by ID (DELETE /customers/{id}).
///
/// Deleting an absent id is not an error; the response is 204 either way.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode, AppError> {
    state.customer_repo.delete_by_id(id).await?;

    tracing::info!(customer_id = id, "Deleted customer");

    Ok(StatusCode::NO_CONTENT)
}
