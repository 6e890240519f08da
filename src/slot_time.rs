//! The fixed hour-label vocabulary used on the wire and in storage.
//!
//! A day has 24 bookable hours, addressed by the labels "12 AM" through
//! "11 PM". A 25th label, next-day "12 AM" (ordinal 24), exists only so a
//! range can end at midnight; it is never bookable itself. All range
//! arithmetic happens on the ordinal, never on the label strings.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Ordinal of the next-day midnight boundary.
const BOUNDARY: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourLabel(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid time slot")]
pub struct InvalidHourLabel(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{from}' to '{to}' is not a valid booking range")]
pub struct InvalidHourRange {
    pub from: String,
    pub to: String,
}

impl HourLabel {
    /// `ordinal` counts hours from midnight; 24 denotes next-day midnight.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        (ordinal <= BOUNDARY).then_some(Self(ordinal))
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    /// The next-day "12 AM" marker closing a range that ends at midnight.
    pub fn is_boundary(self) -> bool {
        self.0 == BOUNDARY
    }

    /// All 25 labels in display order, boundary last.
    pub fn all() -> impl Iterator<Item = HourLabel> {
        (0..=BOUNDARY).map(HourLabel)
    }

    /// Parses the `"h AM"`/`"h PM"` wire format. "12 AM" always parses to
    /// ordinal 0; promotion to the boundary happens in [`HourRange::new`].
    pub fn parse(input: &str) -> Result<Self, InvalidHourLabel> {
        let bad = || InvalidHourLabel(input.to_string());
        let mut parts = input.split_whitespace();
        let hour: u8 = parts
            .next()
            .and_then(|h| h.parse().ok())
            .ok_or_else(bad)?;
        let meridiem = parts.next().ok_or_else(bad)?;
        if parts.next().is_some() || !(1..=12).contains(&hour) {
            return Err(bad());
        }
        let ordinal = match (hour, meridiem) {
            (12, "AM") => 0,
            (h, "AM") => h,
            (12, "PM") => 12,
            (h, "PM") => h + 12,
            _ => return Err(bad()),
        };
        Ok(Self(ordinal))
    }

    /// The absolute instant this hour begins on `date`. The boundary label
    /// starts on the following day.
    pub fn start_instant(self, date: NaiveDate) -> NaiveDateTime {
        let (day, hour) = match self.0 {
            BOUNDARY => (date + Duration::days(1), 0),
            h => (date, u32::from(h)),
        };
        let time = NaiveTime::from_hms_opt(hour, 0, 0).expect("ordinal below 24");
        NaiveDateTime::new(day, time)
    }
}

impl fmt::Display for HourLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour_of_day = self.0 % 24;
        let meridiem = if hour_of_day < 12 { "AM" } else { "PM" };
        let clock = match hour_of_day % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{clock} {meridiem}")
    }
}

impl Serialize for HourLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HourLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        HourLabel::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A half-open run of whole hours `[from, to)` on a single date.
///
/// The conflict check and the slot-insert loop must walk the same hours, so
/// both iterate this one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    start: u8,
    end: u8,
}

impl HourRange {
    /// A `to` of "12 AM" closes the range at next-day midnight rather than
    /// wrapping back to the first hour of the same day.
    pub fn new(from: HourLabel, to: HourLabel) -> Result<Self, InvalidHourRange> {
        let start = from.ordinal();
        let end = match to.ordinal() {
            0 => BOUNDARY,
            e => e,
        };
        if start >= end || start >= BOUNDARY {
            return Err(InvalidHourRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn hours(self) -> impl Iterator<Item = HourLabel> {
        (self.start..self.end).map(HourLabel)
    }

    pub fn hour_count(self) -> u32 {
        u32::from(self.end - self.start)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("12 AM", 0)]
    #[test_case("1 AM", 1)]
    #[test_case("11 AM", 11)]
    #[test_case("12 PM", 12)]
    #[test_case("1 PM", 13)]
    #[test_case("2 PM", 14)]
    #[test_case("11 PM", 23)]
    fn parse_valid_labels(input: &str, expected_ordinal: u8) {
        let label = HourLabel::parse(input).unwrap();
        assert_eq!(label.ordinal(), expected_ordinal);
        assert_eq!(label.to_string(), input);
    }

    #[test_case("13 PM")]
    #[test_case("0 AM")]
    #[test_case("2PM")]
    #[test_case("2 pm")]
    #[test_case("2 PM extra")]
    #[test_case("")]
    #[test_case("noon")]
    fn parse_rejects_malformed_labels(input: &str) {
        HourLabel::parse(input).unwrap_err();
    }

    #[test]
    fn display_round_trips_every_label() {
        for label in HourLabel::all().filter(|l| !l.is_boundary()) {
            assert_eq!(HourLabel::parse(&label.to_string()).unwrap(), label);
        }
    }

    #[test]
    fn boundary_label_displays_as_midnight() {
        let boundary = HourLabel::from_ordinal(24).unwrap();
        assert!(boundary.is_boundary());
        assert_eq!(boundary.to_string(), "12 AM");
    }

    #[test]
    fn all_yields_25_labels_in_order() {
        let labels: Vec<_> = HourLabel::all().collect();
        assert_eq!(labels.len(), 25);
        assert_eq!(labels[0].to_string(), "12 AM");
        assert_eq!(labels[23].to_string(), "11 PM");
        assert!(labels[24].is_boundary());
    }

    #[test]
    fn start_instant_of_boundary_is_next_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let boundary = HourLabel::from_ordinal(24).unwrap();
        assert_eq!(
            boundary.start_instant(date),
            NaiveDate::from_ymd_opt(2025, 1, 11)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        let two_pm = HourLabel::parse("2 PM").unwrap();
        assert_eq!(
            two_pm.start_instant(date),
            date.and_hms_opt(14, 0, 0).unwrap()
        );
    }

    #[test_case("2 PM", "5 PM", &["2 PM", "3 PM", "4 PM"])]
    #[test_case("12 AM", "1 AM", &["12 AM"])]
    #[test_case("11 PM", "12 AM", &["11 PM"])]
    #[test_case("10 PM", "12 AM", &["10 PM", "11 PM"])]
    #[test_case("12 AM", "12 AM", &[
        "12 AM", "1 AM", "2 AM", "3 AM", "4 AM", "5 AM", "6 AM", "7 AM",
        "8 AM", "9 AM", "10 AM", "11 AM", "12 PM", "1 PM", "2 PM", "3 PM",
        "4 PM", "5 PM", "6 PM", "7 PM", "8 PM", "9 PM", "10 PM", "11 PM",
    ])]
    fn range_enumerates_whole_hours(from: &str, to: &str, expected: &[&str]) {
        let range = HourRange::new(
            HourLabel::parse(from).unwrap(),
            HourLabel::parse(to).unwrap(),
        )
        .unwrap();
        let hours: Vec<String> = range.hours().map(|h| h.to_string()).collect();
        assert_eq!(hours, expected);
        assert_eq!(range.hour_count() as usize, expected.len());
    }

    #[test_case("5 PM", "2 PM")]
    #[test_case("2 PM", "2 PM")]
    fn range_rejects_inverted_or_empty(from: &str, to: &str) {
        HourRange::new(
            HourLabel::parse(from).unwrap(),
            HourLabel::parse(to).unwrap(),
        )
        .unwrap_err();
    }

    #[test]
    fn midnight_end_is_the_boundary_not_a_wrap() {
        // "1 AM".."12 AM" runs forward to next-day midnight: 23 hours.
        let range = HourRange::new(
            HourLabel::parse("1 AM").unwrap(),
            HourLabel::parse("12 AM").unwrap(),
        )
        .unwrap();
        assert_eq!(range.hour_count(), 23);
    }

    #[test]
    fn serde_uses_display_strings() {
        let label = HourLabel::parse("2 PM").unwrap();
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"2 PM\"");
        let back: HourLabel = serde_json::from_str("\"2 PM\"").unwrap();
        assert_eq!(back, label);
        serde_json::from_str::<HourLabel>("\"25 PM\"").unwrap_err();
    }
}
