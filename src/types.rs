use crate::slot_time::{HourLabel, HourRange, InvalidHourRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of a *stored* slot row. A row exists only when the hour is not
/// available; "no row for (date, hour)" means available, and that default is
/// interpreted in exactly one place, the [`crate::backend::BookingBackend`]
/// implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Unavailable,
    Maintenance,
}

impl SlotStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotStatus::Unavailable => "Unavailable",
            SlotStatus::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "Unavailable" => Some(SlotStatus::Unavailable),
            "Maintenance" => Some(SlotStatus::Maintenance),
            _ => None,
        }
    }
}

/// A persisted non-available hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSlot {
    pub slot_id: i32,
    pub slot_date: NaiveDate,
    pub slot_time: HourLabel,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i32,
    pub user_id: i32,
    pub booking_date: NaiveDate,
    pub slot_time_from: HourLabel,
    pub slot_time_to: HourLabel,
    pub amount: f64,
}

/// A booking request as handed to the storage layer, already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub user_id: i32,
    pub date: NaiveDate,
    pub from: HourLabel,
    pub to: HourLabel,
    pub amount: f64,
}

impl NewBooking {
    /// The hours this booking covers. Backends call this once and drive both
    /// the conflict check and the slot inserts off the same range.
    pub fn hour_range(&self) -> Result<HourRange, InvalidHourRange> {
        HourRange::new(self.from, self.to)
    }
}

/// Per-hour status in a computed day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Available,
    Booked,
    Maintenance,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub time: HourLabel,
    pub status: ViewStatus,
}
