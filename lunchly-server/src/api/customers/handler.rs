//! Customer API Handlers

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{apply_customer_input, customer_from_input, reservation_from_input};
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Customer, CustomerInput, CustomerRanking, ReservationInput, ReservationView};

const DEFAULT_TOP_LIMIT: i64 = 10;

#[derive(Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct TopQuery {
    pub limit: Option<i64>,
}

/// Customer detail response (customer + reservations)
#[derive(Serialize)]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub full_name: String,
    pub reservations: Vec<ReservationView>,
}

/// GET /api/customers[?q=xxx] - all customers, or a name search
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Customer>>> {
    let Query(query) = query?;
    let customers = match query.q.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => state.customers.search(term).await?,
        _ => state.customers.find_all().await?,
    };
    Ok(Json(customers))
}

/// GET /api/customers/top?limit=N - most reservations first
pub async fn top(
    State(state): State<ServerState>,
    query: Result<Query<TopQuery>, QueryRejection>,
) -> AppResult<Json<Vec<CustomerRanking>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let ranking = state.customers.top_by_reservations(limit).await?;
    Ok(Json(ranking))
}

/// POST /api/customers - create customer
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let Json(input) = payload?;
    let mut customer = customer_from_input(input);
    state.customers.save(&mut customer).await?;

    tracing::info!(customer_id = ?customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /api/customers/{id} - customer with reservations
pub async fn get_by_id(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<CustomerDetail>> {
    let Path(id) = path?;
    let customer = state.customers.get(id).await?;
    let reservations = state
        .customers
        .reservations(&customer)
        .await?
        .into_iter()
        .map(ReservationView::from)
        .collect();

    Ok(Json(CustomerDetail {
        full_name: customer.full_name(),
        customer,
        reservations,
    }))
}

/// PUT /api/customers/{id} - replace customer fields
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> AppResult<Json<Customer>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let mut customer = state.customers.get(id).await?;
    apply_customer_input(&mut customer, input);
    state.customers.save(&mut customer).await?;

    tracing::info!(customer_id = id, "Customer updated");
    Ok(Json(customer))
}

/// POST /api/customers/{id}/reservations - book for this customer
pub async fn add_reservation(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReservationInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ReservationView>)> {
    let Path(id) = path?;
    let Json(input) = payload?;
    // 404 before the store reports a foreign key failure
    let customer = state.customers.get(id).await?;
    let mut reservation = reservation_from_input(id, input)?;
    state.reservations.save(&mut reservation).await?;

    tracing::info!(
        customer_id = id,
        reservation_id = ?reservation.id,
        "Reservation added for {}",
        customer.full_name()
    );
    Ok((StatusCode::CREATED, Json(ReservationView::from(reservation))))
}
