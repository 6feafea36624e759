//! Customer API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/top", get(handler::top))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/reservations", post(handler::add_reservation))
}
