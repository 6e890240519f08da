use crate::backend::BookingBackend;
use crate::error::BackendError;
use crate::slot_time::HourLabel;
use crate::types::{Booking, NewBooking, SlotStatus, StoredSlot};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory backend, used for tests and for running without a database.
///
/// One mutex guard spans each whole operation, which gives `create_booking`
/// the same all-or-nothing behavior the database transaction provides.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    slots: Vec<StoredSlot>,
    bookings: Vec<Booking>,
    last_booking_dates: HashMap<i32, NaiveDate>,
    next_slot_id: i32,
    next_booking_id: i32,
}

impl Inner {
    fn row_exists(&self, date: NaiveDate, time: HourLabel) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.slot_date == date && slot.slot_time == time)
    }

    fn push_slot(&mut self, date: NaiveDate, time: HourLabel, status: SlotStatus) -> i32 {
        self.next_slot_id += 1;
        self.slots.push(StoredSlot {
            slot_id: self.next_slot_id,
            slot_date: date,
            slot_time: time,
            status,
        });
        self.next_slot_id
    }
}

impl BookingBackend for LocalStore {
    fn slots_for_date(&self, date: NaiveDate) -> Result<Vec<StoredSlot>, BackendError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .slots
            .iter()
            .filter(|slot| slot.slot_date == date)
            .cloned()
            .collect())
    }

    fn slot_exceptions(&self) -> Result<Vec<StoredSlot>, BackendError> {
        Ok(self.inner.lock().unwrap().slots.clone())
    }

    fn create_booking(&self, booking: &NewBooking) -> Result<i32, BackendError> {
        let range = booking.hour_range()?;
        let mut inner = self.inner.lock().unwrap();

        // Same enumeration as the insert loop below, so what is checked is
        // exactly what gets written.
        for time in range.hours() {
            if inner.row_exists(booking.date, time) {
                return Err(BackendError::Conflict { label: time });
            }
        }

        inner.next_booking_id += 1;
        let booking_id = inner.next_booking_id;
        inner.bookings.push(Booking {
            booking_id,
            user_id: booking.user_id,
            booking_date: booking.date,
            slot_time_from: booking.from,
            slot_time_to: booking.to,
            amount: booking.amount,
        });
        for time in range.hours() {
            inner.push_slot(booking.date, time, SlotStatus::Unavailable);
        }
        inner
            .last_booking_dates
            .insert(booking.user_id, booking.date);
        Ok(booking_id)
    }

    fn bookings_for_user(&self, user_id: i32) -> Result<Vec<Booking>, BackendError> {
        let inner = self.inner.lock().unwrap();
        let mut bookings: Vec<Booking> = inner
            .bookings
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        // Date descending, then the from-label as text, matching the
        // database ORDER BY.
        bookings.sort_by(|a, b| {
            b.booking_date
                .cmp(&a.booking_date)
                .then_with(|| a.slot_time_from.to_string().cmp(&b.slot_time_from.to_string()))
        });
        Ok(bookings)
    }

    fn add_maintenance_slot(
        &self,
        date: NaiveDate,
        time: HourLabel,
    ) -> Result<i32, BackendError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.row_exists(date, time) {
            return Err(BackendError::Conflict { label: time });
        }
        Ok(inner.push_slot(date, time, SlotStatus::Maintenance))
    }

    fn remove_slot(&self, slot_id: i32) -> Result<(), BackendError> {
        let mut inner = self.inner.lock().unwrap();
        let position = inner.slots.iter().position(|slot| slot.slot_id == slot_id);
        match position {
            Some(index) => {
                inner.slots.remove(index);
                Ok(())
            }
            None => Err(BackendError::Validation(format!(
                "Slot {slot_id} does not exist"
            ))),
        }
    }
}
