use crate::error::BackendError;
use crate::slot_time::HourLabel;
use crate::types::{Booking, NewBooking, StoredSlot};
use chrono::NaiveDate;

/// Storage seam for slots and bookings.
///
/// Slot rows are stored only for non-available hours; an hour with no row is
/// available. Every implementation must make `create_booking` all-or-nothing:
/// the conflict check, the booking row, the per-hour slot rows, and the
/// user's `last_booking_date` update commit together or not at all.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    /// Stored (non-available) slot rows for one date.
    fn slots_for_date(&self, date: NaiveDate) -> Result<Vec<StoredSlot>, BackendError>;

    /// All stored slot rows, any date.
    fn slot_exceptions(&self) -> Result<Vec<StoredSlot>, BackendError>;

    /// Books `[from, to)` atomically and returns the new booking id, or the
    /// first colliding hour as [`BackendError::Conflict`].
    fn create_booking(&self, booking: &NewBooking) -> Result<i32, BackendError>;

    fn bookings_for_user(&self, user_id: i32) -> Result<Vec<Booking>, BackendError>;

    /// Flags a single hour for maintenance; conflicts like a booking would.
    fn add_maintenance_slot(&self, date: NaiveDate, time: HourLabel)
        -> Result<i32, BackendError>;

    /// Removes a stored slot row, returning the hour to available.
    fn remove_slot(&self, slot_id: i32) -> Result<(), BackendError>;
}
