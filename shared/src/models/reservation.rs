//! Reservation Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::util::format_start_at;

/// Reservation for a party, owned by a customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub customer_id: i64,
    pub num_guests: i64,
    pub start_at: NaiveDateTime,
    pub notes: Option<String>,
}

impl Reservation {
    /// Build a transient reservation (not yet persisted)
    pub fn new(
        customer_id: i64,
        num_guests: i64,
        start_at: NaiveDateTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: None,
            customer_id,
            num_guests,
            start_at,
            notes,
        }
    }

    /// Human readable start time, e.g. "April 1st 2024, 7:30 pm"
    pub fn formatted_start_at(&self) -> String {
        format_start_at(&self.start_at)
    }
}

/// Create / edit reservation payload (`start_at` as sent by the client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationInput {
    pub num_guests: i64,
    pub start_at: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Reservation as rendered to clients (adds the display time)
#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub formatted_start_at: String,
}

impl From<Reservation> for ReservationView {
    fn from(reservation: Reservation) -> Self {
        let formatted_start_at = reservation.formatted_start_at();
        Self {
            reservation,
            formatted_start_at,
        }
    }
}
