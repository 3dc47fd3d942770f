//! Gregorian → lunar conversion.
//!
//! The exact path counts civil days from the lunar epoch (1900-01-31, lunar
//! 1900 正月初一), walks whole lunar years, then walks the month slots of the
//! landing year.  Anything the table cannot answer degrades to a result
//! assembled from the Gregorian fields; [`convert`] never fails.

use std::fmt;

use nl_core::errors::{Error, Result};
use nl_core::Year;
use nl_time::Date;
use serde::Serialize;

use crate::calculus::{month_slots, year_days};
use crate::month::{day_name, month_name, LunarMonth};
use crate::sexagenary::{earthly_branch, heavenly_stem, sexagenary_year_name, zodiac};
use crate::solar_term::solar_term;
use crate::year_table::{check_year, FIRST_YEAR, LAST_YEAR};

/// Gregorian date of lunar 1900-01-01.
const EPOCH_YMD: (Year, u8, u8) = (1900, 1, 31);

/// A converted lunar date with its display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    /// Lunar year number (the Gregorian year in which its 正月 begins).
    pub lunar_year: Year,
    /// Month ordinal 1–12.  A leap month repeats its predecessor's ordinal.
    pub lunar_month: u8,
    /// Day of the lunar month, 1–30.
    pub lunar_day: u8,
    /// `true` inside an intercalary month.
    pub is_leap_month: bool,
    /// Month name from the fixed table, without a leap marker.
    pub month_name: &'static str,
    /// Day name, `初一` … `三十`.
    pub day_name: &'static str,
    /// Zodiac animal of `lunar_year`.
    pub zodiac: &'static str,
    /// Heavenly stem of `lunar_year`.
    pub heavenly_stem: &'static str,
    /// Earthly branch of `lunar_year`.
    pub earthly_branch: &'static str,
    /// Stem-branch name of `lunar_year`, e.g. `甲辰`.
    pub sexagenary_year_name: String,
    /// Solar term falling on the Gregorian date, if any.
    pub solar_term: Option<&'static str>,
    /// `false` when the result is the degraded fallback.
    pub exact: bool,
}

impl LunarDate {
    fn assemble(lunar_year: Year, month: LunarMonth, lunar_day: u8) -> Self {
        let lunar_month = month.ordinal();
        Self {
            lunar_year,
            lunar_month,
            lunar_day,
            is_leap_month: month.is_leap(),
            month_name: month_name(lunar_month),
            day_name: day_name(lunar_day),
            zodiac: zodiac(lunar_year),
            heavenly_stem: heavenly_stem(lunar_year),
            earthly_branch: earthly_branch(lunar_year),
            sexagenary_year_name: sexagenary_year_name(lunar_year),
            solar_term: None,
            exact: true,
        }
    }

    /// Degraded result: the Gregorian month and day stand in for the lunar
    /// ones and the sexagenary names come from the Gregorian year.
    pub fn fallback(date: Date) -> Self {
        let (year, month, day) = date.ymd();
        Self {
            exact: false,
            ..Self::assemble(year, LunarMonth::Regular(month), day)
        }
    }

    /// The month slot, carrying the leap flag.
    pub fn month(&self) -> LunarMonth {
        if self.is_leap_month {
            LunarMonth::Leap(self.lunar_month)
        } else {
            LunarMonth::Regular(self.lunar_month)
        }
    }

    /// One-cell annotation: the solar term if present, else the month name
    /// on the first day of a month, else the day name.
    pub fn display_label(&self) -> &'static str {
        match self.solar_term {
            Some(term) => term,
            None if self.lunar_day == 1 => self.month_name,
            None => self.day_name,
        }
    }

    /// `"<年名>年 <月名><日名>"`, followed by `" <节气>"` on a solar term.
    pub fn full_label(&self) -> String {
        let mut label = format!(
            "{}年 {}{}",
            self.sexagenary_year_name, self.month_name, self.day_name
        );
        if let Some(term) = self.solar_term {
            label.push(' ');
            label.push_str(term);
        }
        label
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_label())
    }
}

/// Convert `date` exactly, surfacing any table error.
///
/// # Errors
/// [`Error::OutOfRange`] when the Gregorian year is outside 1900–2100 or
/// the date precedes the lunar epoch.
pub fn try_convert(date: Date) -> Result<LunarDate> {
    let (year, month, day) = date.ymd();
    check_year(year)?;

    let (ey, em, ed) = EPOCH_YMD;
    let mut offset = date - Date::from_ymd(ey, em, ed)?;
    if offset < 0 {
        return Err(Error::out_of_range(
            "days since lunar epoch",
            offset,
            0,
            i64::MAX,
        ));
    }

    let mut lunar_year = FIRST_YEAR;
    loop {
        let days = i32::from(year_days(lunar_year)?);
        if offset < days {
            break;
        }
        offset -= days;
        lunar_year += 1;
        check_year(lunar_year)?;
    }

    let (slot, _) = month_slots(lunar_year)?
        .find(|&(_, days)| {
            if offset < i32::from(days) {
                true
            } else {
                offset -= i32::from(days);
                false
            }
        })
        .ok_or_else(|| {
            Error::out_of_range("lunar year", lunar_year, FIRST_YEAR.into(), LAST_YEAR.into())
        })?;

    // `offset` is below a month length here, so it fits a day number.
    let lunar_day = (offset + 1) as u8;
    Ok(LunarDate {
        solar_term: solar_term(year, month, day),
        ..LunarDate::assemble(lunar_year, slot, lunar_day)
    })
}

/// Convert `date`, degrading to [`LunarDate::fallback`] instead of failing.
///
/// # Example
/// ```
/// use nl_lunar::convert;
/// use nl_time::Date;
///
/// let lunar = convert(Date::from_ymd(2024, 2, 10).unwrap());
/// assert_eq!((lunar.lunar_year, lunar.lunar_month, lunar.lunar_day), (2024, 1, 1));
/// assert_eq!(lunar.sexagenary_year_name, "甲辰");
/// ```
pub fn convert(date: Date) -> LunarDate {
    match try_convert(date) {
        Ok(lunar) => lunar,
        Err(err) => {
            tracing::warn!(%date, error = %err, "lunar conversion degraded to fallback");
            LunarDate::fallback(date)
        }
    }
}

/// Parse `text` as a date and convert it.
///
/// # Errors
/// [`Error::MalformedInput`] if `text` is not a recognised date.
pub fn convert_str(text: &str) -> Result<LunarDate> {
    let date: Date = text.parse()?;
    Ok(convert(date))
}
