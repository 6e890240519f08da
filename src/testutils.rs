use crate::backend::BookingBackend;
use crate::error::BackendError;
use crate::slot_time::HourLabel;
use crate::types::{Booking, NewBooking, StoredSlot};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockBackendInner {
    pub failure: Mutex<Option<BackendError>>,
    pub calls_to_slots_for_date: AtomicU64,
    pub calls_to_slot_exceptions: AtomicU64,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_bookings_for_user: AtomicU64,
    pub calls_to_add_maintenance_slot: AtomicU64,
    pub calls_to_remove_slot: AtomicU64,
    pub slots: Mutex<Vec<StoredSlot>>,
    pub bookings: Mutex<Vec<Booking>>,
}

/// Backend stub for HTTP tests: counts calls and fails on demand.
#[derive(Clone)]
pub struct MockBackend(pub Arc<MockBackendInner>);

impl MockBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBackendInner {
            failure: Mutex::default(),
            calls_to_slots_for_date: AtomicU64::default(),
            calls_to_slot_exceptions: AtomicU64::default(),
            calls_to_create_booking: AtomicU64::default(),
            calls_to_bookings_for_user: AtomicU64::default(),
            calls_to_add_maintenance_slot: AtomicU64::default(),
            calls_to_remove_slot: AtomicU64::default(),
            slots: Mutex::default(),
            bookings: Mutex::default(),
        }))
    }

    /// Makes every subsequent call fail with `error`.
    pub fn fail_with(&self, error: BackendError) {
        *self.0.failure.lock().unwrap() = Some(error);
    }

    fn check(&self) -> Result<(), BackendError> {
        match &*self.0.failure.lock().unwrap() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl BookingBackend for MockBackend {
    fn slots_for_date(&self, date: NaiveDate) -> Result<Vec<StoredSlot>, BackendError> {
        self.0.calls_to_slots_for_date.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .0
            .slots
            .lock()
            .unwrap()
            .iter()
            .filter(|slot| slot.slot_date == date)
            .cloned()
            .collect())
    }

    fn slot_exceptions(&self) -> Result<Vec<StoredSlot>, BackendError> {
        self.0
            .calls_to_slot_exceptions
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.0.slots.lock().unwrap().clone())
    }

    fn create_booking(&self, _booking: &NewBooking) -> Result<i32, BackendError> {
        self.0
            .calls_to_create_booking
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(1)
    }

    fn bookings_for_user(&self, user_id: i32) -> Result<Vec<Booking>, BackendError> {
        self.0
            .calls_to_bookings_for_user
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect())
    }

    fn add_maintenance_slot(
        &self,
        _date: NaiveDate,
        _time: HourLabel,
    ) -> Result<i32, BackendError> {
        self.0
            .calls_to_add_maintenance_slot
            .fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(1)
    }

    fn remove_slot(&self, _slot_id: i32) -> Result<(), BackendError> {
        self.0.calls_to_remove_slot.fetch_add(1, Ordering::SeqCst);
        self.check()
    }
}
