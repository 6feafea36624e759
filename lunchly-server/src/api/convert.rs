//! Request payload conversion
//!
//! Turns API payloads (shared::models::*Input) into model objects. Form
//! inputs arrive with empty strings for untouched optional fields; those
//! become `None` here, never inside the repositories.

use shared::models::{Customer, CustomerInput, Reservation, ReservationInput};

use crate::utils::AppResult;
use crate::utils::time::parse_start_at;

// ============ Helper ============

pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============ Customer ============

pub fn customer_from_input(input: CustomerInput) -> Customer {
    let mut customer = Customer::new(String::new(), String::new(), None, None);
    apply_customer_input(&mut customer, input);
    customer
}

/// Overwrite every editable field, keeping the id
pub fn apply_customer_input(customer: &mut Customer, input: CustomerInput) {
    customer.first_name = input.first_name.trim().to_string();
    customer.last_name = input.last_name.trim().to_string();
    customer.phone = blank_to_none(input.phone);
    customer.notes = blank_to_none(input.notes);
}

// ============ Reservation ============

pub fn reservation_from_input(customer_id: i64, input: ReservationInput) -> AppResult<Reservation> {
    let start_at = parse_start_at(&input.start_at)?;
    Ok(Reservation::new(
        customer_id,
        input.num_guests,
        start_at,
        blank_to_none(input.notes),
    ))
}

/// Overwrite guests, start time and notes, keeping id and owner
pub fn apply_reservation_input(
    reservation: &mut Reservation,
    input: ReservationInput,
) -> AppResult<()> {
    reservation.start_at = parse_start_at(&input.start_at)?;
    reservation.num_guests = input.num_guests;
    reservation.notes = blank_to_none(input.notes);
    Ok(())
}
