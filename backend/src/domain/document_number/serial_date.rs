//! Calendar day component of a document number.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use mockable::Clock;

const SERIAL_DATE_FORMAT: &str = "%y%m%d";

/// Width of the formatted date, in characters.
pub const SERIAL_DATE_LEN: usize = 6;

/// Returned when a `YYMMDD` string does not name a real calendar day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("serial date must be six digits naming a calendar day (YYMMDD), got {raw:?}")]
pub struct SerialDateError {
    raw: String,
}

/// Local calendar day a counter belongs to.
///
/// Stored as a structured date; formatted as two-digit year, month, and day.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use docket::domain::SerialDate;
///
/// let date = SerialDate::from_naive(NaiveDate::from_ymd_opt(2025, 10, 10).expect("date"));
/// assert_eq!(date.to_string(), "251010");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SerialDate(NaiveDate);

impl SerialDate {
    /// Wrap a calendar date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in the clock's local timezone.
    pub fn today(clock: &dyn Clock) -> Self {
        Self(clock.local().date_naive())
    }

    /// The underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for SerialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SERIAL_DATE_FORMAT))
    }
}

impl FromStr for SerialDate {
    type Err = SerialDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SerialDateError { raw: s.to_owned() };
        if s.len() != SERIAL_DATE_LEN || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, SERIAL_DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }
}
