//! # nl-lunar
//!
//! Chinese lunar calendar for Gregorian dates 1900–2100: the packed year
//! table and its decoding, Gregorian → lunar conversion, solar-term
//! estimation, stem-branch year names, and festival lookup.
//!
//! ```
//! use nl_lunar::{convert, festivals_for};
//! use nl_time::Date;
//!
//! let date = Date::from_ymd(2024, 9, 17).unwrap();
//! let lunar = convert(date);
//! assert_eq!(lunar.full_label(), "甲辰年 八月十五");
//! assert_eq!(festivals_for(date).all, ["中秋节"]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Packed per-year lunar data, 1900–2100.
pub mod year_table;

/// Lunar month slots and name tables.
pub mod month;

/// Leap month, month and year lengths.
pub mod calculus;

/// Gregorian → lunar conversion.
pub mod converter;

/// Solar-term estimation.
pub mod solar_term;

/// Heavenly stems, earthly branches and zodiac animals.
pub mod sexagenary;

/// Festival tables and festival calendars.
pub mod festival;

/// Calendar-cell labels.
pub mod label;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calculus::{
    leap_month, leap_month_days, month_days, month_slots, slot_days, year_days, MonthSlots,
};
pub use converter::{convert, convert_str, try_convert, LunarDate};
pub use festival::{
    festivals_for, is_holiday, lunar_festivals, solar_festivals, BespokeFestivalCalendar,
    FestivalCalendar, FestivalInfo, JointFestivalCalendar, LunarFestivalCalendar,
    SolarFestivalCalendar,
};
pub use label::{display_label, full_label};
pub use month::LunarMonth;
pub use sexagenary::{
    earthly_branch, heavenly_stem, sexagenary_index, sexagenary_year_name, zodiac,
};
pub use solar_term::{solar_term, solar_term_name, term_date, terms_of_year};
pub use year_table::{FIRST_YEAR, LAST_YEAR};
