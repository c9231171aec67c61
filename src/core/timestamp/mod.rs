//! # Timestamp Module
//!
//! Parses capture times and guesses in the EXIF wire format and measures
//! how far apart two of them are.
//!
//! Both embedded metadata and typed guesses use `YYYY:MM:DD HH:MM:SS`
//! (24-hour clock, zero padded). The shape is checked strictly before
//! chrono validates the calendar, so `2020:1:1 9:00:00` is rejected even
//! though chrono alone would accept it.

use crate::error::DateFormatError;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// chrono pattern for the wire format
pub const TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Human-readable form of [`TIMESTAMP_FORMAT`], used in prompts
pub const TIMESTAMP_HINT: &str = "YYYY:MM:DD HH:MM:SS";

const SECONDS_PER_DAY: f64 = 86_400.0;

fn shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]{4}:[0-9]{2}:[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
            .expect("timestamp pattern is valid")
    })
}

/// A validated capture time with second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parse a timestamp that must match the wire format exactly
    pub fn parse(raw: &str) -> Result<Self, DateFormatError> {
        if !shape().is_match(raw) {
            return Err(DateFormatError {
                input: raw.to_string(),
                reason: "does not match the expected layout".to_string(),
            });
        }

        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .map(Timestamp)
            .map_err(|e| DateFormatError {
                input: raw.to_string(),
                reason: e.to_string(),
            })
    }

    /// Absolute distance to `other` in fractional days
    pub fn days_between(&self, other: &Timestamp) -> f64 {
        let seconds = (self.0 - other.0).num_seconds().unsigned_abs();
        seconds as f64 / SECONDS_PER_DAY
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = DateFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Timestamp::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.to_string()
    }
}

/// Difference between two textual timestamps, in fractional days.
///
/// Symmetric, and zero for identical inputs. Fails if either side is not in
/// the wire format.
pub fn date_diff(a: &str, b: &str) -> Result<f64, DateFormatError> {
    let a = Timestamp::parse(a)?;
    let b = Timestamp::parse(b)?;
    Ok(a.days_between(&b))
}

/// Validate a player's guess.
///
/// The interactive loop calls this until it succeeds; no trimming is done,
/// so the caller decides what counts as the raw guess.
pub fn validate_guess(raw: &str) -> Result<Timestamp, DateFormatError> {
    Timestamp::parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_day_apart() {
        let days = date_diff("2020:01:01 12:00:00", "2020:01:02 12:00:00").unwrap();
        assert_eq!(days, 1.0);
    }

    #[test]
    fn fractional_days() {
        let days = date_diff("2020:01:01 00:00:00", "2020:01:01 06:00:00").unwrap();
        assert!((days - 0.25).abs() < 1e-12);
    }

    #[test]
    fn crosses_leap_day() {
        let days = date_diff("2020:02:28 00:00:00", "2020:03:01 00:00:00").unwrap();
        assert_eq!(days, 2.0);
    }

    #[test]
    fn rejects_wrong_separators() {
        assert!(Timestamp::parse("2020-01-01 12:00:00").is_err());
        assert!(Timestamp::parse("2020:01:01T12:00:00").is_err());
    }

    #[test]
    fn rejects_unpadded_fields() {
        assert!(Timestamp::parse("2020:1:01 12:00:00").is_err());
        assert!(Timestamp::parse("2020:01:01 9:00:00").is_err());
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(Timestamp::parse(" 2020:01:01 12:00:00").is_err());
        assert!(Timestamp::parse("2020:01:01 12:00:00\n").is_err());
    }

    #[test]
    fn rejects_impossible_calendar_values() {
        let err = Timestamp::parse("2021:02:29 12:00:00").unwrap_err();
        assert_eq!(err.input, "2021:02:29 12:00:00");
        assert!(Timestamp::parse("2020:13:01 12:00:00").is_err());
        assert!(Timestamp::parse("2020:01:01 24:00:00").is_err());
    }

    #[test]
    fn malformed_guess_reports_input() {
        let err = validate_guess("not-a-date").unwrap_err();
        assert_eq!(err.input, "not-a-date");
    }

    #[test]
    fn display_round_trips() {
        let ts = Timestamp::parse("1999:12:31 23:59:59").unwrap();
        assert_eq!(ts.to_string(), "1999:12:31 23:59:59");
    }

    #[test]
    fn serializes_as_wire_string() {
        let ts = Timestamp::parse("2015:06:01 08:30:00").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2015:06:01 08:30:00\"");
        assert!(serde_json::from_str::<Timestamp>("\"June 1st\"").is_err());
    }

    fn timestamp_string() -> impl Strategy<Value = String> {
        (1900i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
            |(y, mo, d, h, mi, s)| format!("{:04}:{:02}:{:02} {:02}:{:02}:{:02}", y, mo, d, h, mi, s),
        )
    }

    proptest! {
        #[test]
        fn diff_is_symmetric(a in timestamp_string(), b in timestamp_string()) {
            prop_assert_eq!(date_diff(&a, &b).unwrap(), date_diff(&b, &a).unwrap());
        }

        #[test]
        fn diff_to_self_is_zero(a in timestamp_string()) {
            prop_assert_eq!(date_diff(&a, &a).unwrap(), 0.0);
        }

        #[test]
        fn arbitrary_text_never_panics(raw in ".*") {
            let _ = date_diff(&raw, "2020:01:01 00:00:00");
        }

        #[test]
        fn non_timestamp_text_is_rejected(raw in "[a-zA-Z ]{0,30}") {
            prop_assert!(date_diff(&raw, "2020:01:01 00:00:00").is_err());
        }
    }
}
