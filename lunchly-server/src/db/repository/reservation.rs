//! Reservation Repository

use super::{RepoError, RepoResult};
use crate::db::executor::{Row, SharedExecutor, SqlValue};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_guest_count, validate_id, validate_optional_text,
};
use shared::models::Reservation;

const RESERVATION_SELECT: &str =
    "SELECT id, customer_id, num_guests, start_at, notes FROM reservations";

const RESERVATION_INSERT: &str = "INSERT INTO reservations (customer_id, num_guests, start_at, notes) VALUES (?1, ?2, ?3, ?4) RETURNING id";

const RESERVATION_UPDATE: &str = "UPDATE reservations SET num_guests = ?1, start_at = ?2, notes = ?3 WHERE id = ?4 RETURNING id";

#[derive(Clone)]
pub struct ReservationRepository {
    executor: SharedExecutor,
}

impl ReservationRepository {
    pub fn new(executor: SharedExecutor) -> Self {
        Self { executor }
    }

    /// Reservations of one customer, earliest first.
    /// Does not check that the customer exists.
    pub async fn list_for_customer(&self, customer_id: i64) -> RepoResult<Vec<Reservation>> {
        let sql = format!("{RESERVATION_SELECT} WHERE customer_id = ?1 ORDER BY start_at, id");
        let rows = self
            .executor
            .execute(&sql, &[SqlValue::Integer(customer_id)])
            .await?;
        rows.iter().map(reservation_from_row).collect()
    }

    pub async fn get(&self, id: i64) -> RepoResult<Reservation> {
        let sql = format!("{RESERVATION_SELECT} WHERE id = ?1");
        let rows = self.executor.execute(&sql, &[SqlValue::Integer(id)]).await?;
        match rows.first() {
            Some(row) => reservation_from_row(row),
            None => Err(RepoError::NotFound(format!("Reservation {id} not found"))),
        }
    }

    /// Insert when `id` is unset (the new id is written back), otherwise
    /// rewrite guests, start time and notes of the existing row.
    pub async fn save(&self, reservation: &mut Reservation) -> RepoResult<()> {
        validate(reservation)?;

        match reservation.id {
            None => {
                let rows = self
                    .executor
                    .execute(
                        RESERVATION_INSERT,
                        &[
                            reservation.customer_id.into(),
                            reservation.num_guests.into(),
                            reservation.start_at.into(),
                            reservation.notes.clone().into(),
                        ],
                    )
                    .await?;
                let row = rows
                    .first()
                    .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))?;
                reservation.id = Some(row.i64("id")?);
            }
            Some(id) => {
                let rows = self
                    .executor
                    .execute(
                        RESERVATION_UPDATE,
                        &[
                            reservation.num_guests.into(),
                            reservation.start_at.into(),
                            reservation.notes.clone().into(),
                            id.into(),
                        ],
                    )
                    .await?;
                if rows.is_empty() {
                    return Err(RepoError::NotFound(format!("Reservation {id} not found")));
                }
            }
        }
        Ok(())
    }
}

fn validate(reservation: &Reservation) -> RepoResult<()> {
    validate_id(reservation.customer_id, "customer_id")?;
    validate_guest_count(reservation.num_guests)?;
    validate_optional_text(&reservation.notes, "notes", MAX_NOTE_LEN)
}

fn reservation_from_row(row: &Row) -> RepoResult<Reservation> {
    Ok(Reservation {
        id: Some(row.i64("id")?),
        customer_id: row.i64("customer_id")?,
        num_guests: row.i64("num_guests")?,
        start_at: row.datetime("start_at")?,
        notes: row.opt_string("notes")?,
    })
}
