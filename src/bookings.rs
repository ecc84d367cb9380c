//! In-memory reservation records
//!
//! Bookings are kept for the lifetime of the process only. Property
//! identifiers are stored as given and never checked against the catalog.

use chrono::Utc;
use serde::Serialize;

use crate::catalog::fresh_id;
use crate::model::{Booking, BookingStatus, NewBooking};

/// Optional constraints for listing bookings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub property_id: Option<String>,
}

/// Booking totals per status, as shown on the admin dashboard
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Bookings {
    records: Vec<Booking>,
}

impl Bookings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Booking> {
        self.records.iter().find(|b| b.id == id)
    }

    /// Records a new booking in `pending` state
    pub fn add(&mut self, payload: NewBooking) -> Booking {
        let id = fresh_id(|candidate| self.get(candidate).is_some());

        let booking = Booking {
            id,
            property_id: payload.property_id,
            guest_name: payload.guest_name,
            guest_email: payload.guest_email,
            check_in: payload.check_in,
            check_out: payload.check_out,
            guests: payload.guests,
            total_price: payload.total_price,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        };

        self.records.push(booking.clone());
        booking
    }

    pub fn set_status(&mut self, id: &str, status: BookingStatus) -> Option<Booking> {
        let booking = self.records.iter_mut().find(|b| b.id == id)?;
        booking.status = status;
        Some(booking.clone())
    }

    pub fn delete(&mut self, id: &str) -> Option<Booking> {
        let index = self.records.iter().position(|b| b.id == id)?;
        Some(self.records.remove(index))
    }

    /// Bookings matching `filter`, oldest first
    pub fn list(&self, filter: &BookingFilter) -> Vec<Booking> {
        self.records
            .iter()
            .filter(|b| filter.status.map_or(true, |status| b.status == status))
            .filter(|b| {
                filter
                    .property_id
                    .as_deref()
                    .map_or(true, |property_id| b.property_id == property_id)
            })
            .cloned()
            .collect()
    }

    pub fn count_by_status(&self) -> StatusCounts {
        self.records
            .iter()
            .fold(StatusCounts::default(), |mut counts, booking| {
                match booking.status {
                    BookingStatus::Pending => counts.pending += 1,
                    BookingStatus::Confirmed => counts.confirmed += 1,
                    BookingStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }
}
