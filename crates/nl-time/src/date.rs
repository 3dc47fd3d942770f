//! `Date` type.
//!
//! Dates are stored as a serial number of days.  Serial 1 is
//! **January 1, 1900**, the first day of the lunar table's Gregorian span;
//! earlier dates have zero or negative serials.  Differences between serials
//! are exact civil-day counts, with no time-of-day or time-zone component.
//!
//! # Valid range
//! 0001-01-01 to 9999-12-31 (proleptic Gregorian).  The lunar engine only
//! converts 1900–2100 exactly, but callers may hand it any representable
//! date and receive a degraded result outside that window.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use nl_core::errors::{Error, Result};
use nl_core::utilities::data_parsers;
use nl_core::{Millis, Serial, Year};

use crate::weekday::Weekday;

/// A Gregorian calendar date represented as a serial day number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(Serial);

// ── Constants ─────────────────────────────────────────────────────────────────

/// Serial of 1970-01-01.
const UNIX_EPOCH_SERIAL: Serial = 25_568;

/// Milliseconds per civil day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

impl Date {
    /// Minimum representable date: January 1, 0001.
    pub const MIN: Date = Date(-693_594);

    /// Maximum representable date: December 31, 9999.
    pub const MAX: Date = Date(2_958_464);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    pub fn from_serial(serial: Serial) -> Result<Self> {
        let d = Date(serial);
        if d < Self::MIN || d > Self::MAX {
            return Err(Error::Date(format!("serial {serial} out of range")));
        }
        Ok(d)
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: Year, month: u8, day: u8) -> Result<Self> {
        if !(1..=9999).contains(&year) {
            return Err(Error::Date(format!("year {year} out of range [1, 9999]")));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {days_in}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// The UTC calendar date containing the instant `millis` milliseconds
    /// after 1970-01-01T00:00:00Z.
    ///
    /// Fractional milliseconds are truncated toward zero before the day is
    /// taken, the same way an ECMAScript time value is clipped.
    pub fn from_unix_millis(millis: Millis) -> Result<Self> {
        if !millis.is_finite() {
            return Err(Error::Date(format!("non-finite instant {millis}")));
        }
        let days = (millis.trunc() as i64).div_euclid(MILLIS_PER_DAY);
        let serial = i64::from(UNIX_EPOCH_SERIAL) + days;
        if serial < i64::from(Self::MIN.0) || serial > i64::from(Self::MAX.0) {
            return Err(Error::Date(format!("instant {millis} out of range")));
        }
        Ok(Date(serial as Serial))
    }

    /// Today's date in the local time zone.
    pub fn today() -> Self {
        Self::from(chrono::Local::now().date_naive())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> Serial {
        self.0
    }

    /// Return the year.
    pub fn year(&self) -> Year {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)` in one decomposition.
    pub fn ymd(&self) -> (Year, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let (y, _, _) = ymd_from_serial(self.0);
        (self.0 - serial_from_ymd(y, 1, 1) + 1) as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday.
        let from_monday = (self.0 - UNIX_EPOCH_SERIAL + 3).rem_euclid(7) as u8;
        Weekday::from_ordinal(from_monday + 1).expect("rem_euclid always in 0..7")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self
            .0
            .checked_add(n)
            .ok_or_else(|| Error::Date(format!("date arithmetic overflow adding {n}")))?;
        Self::from_serial(serial)
            .map_err(|_| Error::Date(format!("date arithmetic: result {serial} out of range")))
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the first day of the month containing this date.
    pub fn start_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, 1))
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, days_in_month(y, m)))
    }

    /// Iterate over every date from `self` to `end`, both inclusive.
    pub fn iter_until(self, end: Date) -> impl Iterator<Item = Date> {
        (self.0..=end.0).map(Date)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i32> for Date {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

// ── Display / parsing ─────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and `YYYY年M月D日`.
    fn from_str(s: &str) -> Result<Self> {
        let (y, m, d) = data_parsers::parse_date(s)
            .ok_or_else(|| Error::MalformedInput(format!("not a date: {s:?}")))?;
        Date::from_ymd(y, m, d)
    }
}

// ── chrono interop ────────────────────────────────────────────────────────────

impl From<NaiveDate> for Date {
    /// Dates outside 0001–9999 are clamped to [`Date::MIN`] / [`Date::MAX`].
    fn from(d: NaiveDate) -> Self {
        match Date::from_ymd(d.year(), d.month() as u8, d.day() as u8) {
            Ok(date) => date,
            Err(_) if d.year() < 1 => Date::MIN,
            Err(_) => Date::MAX,
        }
    }
}

impl From<Date> for NaiveDate {
    fn from(d: Date) -> Self {
        let (y, m, day) = ymd_from_serial(d.0);
        NaiveDate::from_ymd_opt(y, u32::from(m), u32::from(day))
            .expect("every Date is a valid civil date")
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a Gregorian leap year.
pub fn is_leap_year(year: Year) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: Year, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Convert (year, month, day) to a serial number.
///
/// Counts days from 1970-01-01 on a March-based year, where the leap day
/// falls at the end, then shifts onto the 1900 serial base.
fn serial_from_ymd(year: Year, month: u8, day: u8) -> Serial {
    let m = month as i32;
    let y = if m <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468 + UNIX_EPOCH_SERIAL
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: Serial) -> (Year, u8, u8) {
    let z = serial - UNIX_EPOCH_SERIAL + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let y = yoe + era * 400 + if m <= 2 { 1 } else { 0 };
    (y, m, d)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
