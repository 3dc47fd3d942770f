//! Linear estimate of the 24 solar terms (节气).
//!
//! Each term instant is the 1900 base instant advanced by whole mean tropical
//! years plus a fixed per-term offset.  The estimate is good to the day for
//! 1900–2100, which is all the calendar annotations need; it is not an
//! ephemeris.

use nl_core::{Millis, Minutes, Year};
use nl_time::Date;

use crate::year_table::{FIRST_YEAR, LAST_YEAR};

/// Term names in table order, starting with 小寒 in early January.
pub const SOLAR_TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

/// Minutes from the start of the tropical year to each term.
pub const TERM_OFFSET_MINUTES: [Minutes; 24] = [
    0, 21_208, 42_467, 63_836, 85_337, 107_014, 128_867, 150_921, 173_149, 195_551, 218_072,
    240_693, 263_343, 285_989, 308_563, 331_033, 353_350, 375_494, 397_447, 419_210, 440_795,
    462_224, 483_532, 504_758,
];

/// Mean tropical year in milliseconds.
pub const TROPICAL_YEAR_MS: Millis = 31_556_925_974.7;

/// 1900-01-06T02:05:00Z as Unix milliseconds: 小寒 of 1900.
pub const EPOCH_MS: Millis = -2_208_549_300_000.0;

/// Name of term `index` (0 = 小寒 … 23 = 冬至).
pub fn solar_term_name(index: usize) -> Option<&'static str> {
    SOLAR_TERM_NAMES.get(index).copied()
}

/// Estimated instant of term `index` in `year`, in Unix milliseconds.
///
/// Returns `None` outside 1900–2100 or for an index ≥ 24.
pub fn term_instant_millis(year: Year, index: usize) -> Option<Millis> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    let offset = *TERM_OFFSET_MINUTES.get(index)?;
    Some(TROPICAL_YEAR_MS * f64::from(year - FIRST_YEAR) + (offset * 60_000) as f64 + EPOCH_MS)
}

/// UTC calendar date of term `index` in `year`.
///
/// # Example
/// ```
/// use nl_lunar::term_date;
/// use nl_time::Date;
///
/// // 立春 2024
/// assert_eq!(term_date(2024, 2), Some(Date::from_ymd(2024, 2, 4).unwrap()));
/// ```
pub fn term_date(year: Year, index: usize) -> Option<Date> {
    Date::from_unix_millis(term_instant_millis(year, index)?).ok()
}

/// The solar term falling on the Gregorian date `year-month-day`, if any.
///
/// Only the two terms belonging to `month` are candidates; the first one
/// whose UTC day-of-month equals `day` wins.
pub fn solar_term(year: Year, month: u8, day: u8) -> Option<&'static str> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let first = usize::from(month) * 2 - 2;
    [first, first + 1].into_iter().find_map(|index| {
        let date = term_date(year, index)?;
        (date.day_of_month() == day).then_some(SOLAR_TERM_NAMES[index])
    })
}

/// Iterate over the 24 terms of `year` with their estimated dates.
///
/// Empty outside 1900–2100.
pub fn terms_of_year(year: Year) -> impl Iterator<Item = (&'static str, Date)> {
    (0..SOLAR_TERM_NAMES.len())
        .filter_map(move |index| Some((SOLAR_TERM_NAMES[index], term_date(year, index)?)))
}
