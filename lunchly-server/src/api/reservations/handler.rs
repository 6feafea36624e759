//! Reservation API Handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::api::convert::apply_reservation_input;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{ReservationInput, ReservationView};

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ReservationView>> {
    let Path(id) = path?;
    let reservation = state.reservations.get(id).await?;
    Ok(Json(ReservationView::from(reservation)))
}

/// PUT /api/reservations/{id} - edit guests, start time and notes
pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReservationInput>, JsonRejection>,
) -> AppResult<Json<ReservationView>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let mut reservation = state.reservations.get(id).await?;
    apply_reservation_input(&mut reservation, input)?;
    state.reservations.save(&mut reservation).await?;

    tracing::info!(reservation_id = id, "Reservation updated");
    Ok(Json(ReservationView::from(reservation)))
}
