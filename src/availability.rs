//! Derives the per-hour booking status of a calendar day.
//!
//! The view combines stored slot rows with the wall clock: on today's date a
//! past hour is disabled no matter what is stored, since it can no longer be
//! selected. Stored statuses are never downgraded back to available by a
//! recomputation.

use crate::backend::BookingBackend;
use crate::error::BackendError;
use crate::slot_time::HourLabel;
use crate::types::{SlotStatus, SlotView, StoredSlot, ViewStatus};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Cadence at which a watched day view is recomputed.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Status of all 25 hour labels of `date`, boundary label last.
///
/// Priority per hour: past-hour-on-today beats stored state, stored state
/// beats the available default.
pub fn compute_day_view(
    date: NaiveDate,
    now: NaiveDateTime,
    stored: &[StoredSlot],
) -> Vec<SlotView> {
    let viewing_today = date == now.date();
    HourLabel::all()
        .map(|time| {
            let status = if viewing_today && time.start_instant(date) <= now {
                ViewStatus::Disabled
            } else {
                let row = stored
                    .iter()
                    .find(|slot| slot.slot_date == date && slot.slot_time == time);
                match row.map(|slot| slot.status) {
                    Some(SlotStatus::Maintenance) => ViewStatus::Maintenance,
                    Some(SlotStatus::Unavailable) => ViewStatus::Booked,
                    None => ViewStatus::Available,
                }
            };
            SlotView { time, status }
        })
        .collect()
}

/// The user-selectable hours of a view: the next-day midnight marker only
/// closes ranges and is filtered out.
pub fn selectable_hours(view: &[SlotView]) -> Vec<SlotView> {
    view.iter()
        .filter(|slot| !slot.time.is_boundary())
        .copied()
        .collect()
}

/// Republishes the day view for one date on a fixed cadence, so a viewer of
/// today sees hours roll over into disabled as time passes. Dropping the
/// watcher tears the refresh task down.
pub struct DayViewWatcher {
    receiver: watch::Receiver<Vec<SlotView>>,
    task: JoinHandle<()>,
}

impl DayViewWatcher {
    pub fn spawn<B: BookingBackend>(
        backend: B,
        date: NaiveDate,
        period: Duration,
    ) -> Result<Self, BackendError> {
        let initial = refresh(&backend, date)?;
        let (sender, receiver) = watch::channel(initial);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await; // immediate first tick, already published
            loop {
                ticker.tick().await;
                match refresh(&backend, date) {
                    // Keep the previous view on a failed refresh.
                    Err(err) => tracing::warn!("day view refresh failed: {err}"),
                    Ok(view) => {
                        if sender.send(view).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        Ok(Self { receiver, task })
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<SlotView>> {
        self.receiver.clone()
    }

    pub fn view(&self) -> Vec<SlotView> {
        self.receiver.borrow().clone()
    }
}

impl Drop for DayViewWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn refresh<B: BookingBackend>(backend: &B, date: NaiveDate) -> Result<Vec<SlotView>, BackendError> {
    let stored = backend.slots_for_date(date)?;
    Ok(compute_day_view(
        date,
        Local::now().naive_local(),
        &stored,
    ))
}
