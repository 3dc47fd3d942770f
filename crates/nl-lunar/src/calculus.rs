//! Decoding of the packed year table: leap month, month lengths, year
//! lengths, and the ordered month slots of a year.

use nl_core::errors::{Error, Result};
use nl_core::Year;

use crate::month::LunarMonth;
use crate::year_table;

/// Twelve 29-day months.
const BASE_YEAR_DAYS: u16 = 348;

/// Bits 4–15: the ordinary-month flags.
const MONTH_FLAGS_MASK: u32 = 0xfff0;

/// Bit 16: leap-month length.
const LEAP_LENGTH_BIT: u32 = 0x10000;

/// Return the leap-month ordinal of `year`, or 0 if it has none.
///
/// # Errors
/// [`Error::OutOfRange`] if `year` is outside 1900–2100.
///
/// # Example
/// ```
/// assert_eq!(nl_lunar::leap_month(2023).unwrap(), 2);
/// assert_eq!(nl_lunar::leap_month(2024).unwrap(), 0);
/// ```
pub fn leap_month(year: Year) -> Result<u8> {
    Ok((year_table::entry(year)? & 0xf) as u8)
}

/// Return the length of `year`'s leap month (29 or 30), or 0 if it has none.
pub fn leap_month_days(year: Year) -> Result<u8> {
    let info = year_table::entry(year)?;
    if info & 0xf == 0 {
        return Ok(0);
    }
    Ok(if info & LEAP_LENGTH_BIT != 0 { 30 } else { 29 })
}

/// Return the length (29 or 30) of ordinary month `month` (1–12) of `year`.
///
/// Month `m` is flagged by mask `0x10000 >> m`, so month 1 is bit 15 and
/// month 12 is bit 4.
pub fn month_days(year: Year, month: u8) -> Result<u8> {
    if !(1..=12).contains(&month) {
        return Err(Error::out_of_range("lunar month", month, 1, 12));
    }
    let info = year_table::entry(year)?;
    Ok(if info & (0x10000 >> month) != 0 { 30 } else { 29 })
}

/// Return the total number of days in lunar `year`, leap month included.
pub fn year_days(year: Year) -> Result<u16> {
    let info = year_table::entry(year)?;
    let long_months = (info & MONTH_FLAGS_MASK).count_ones() as u16;
    Ok(BASE_YEAR_DAYS + long_months + u16::from(leap_month_days(year)?))
}

/// Return the days in a specific month slot.
pub fn slot_days(year: Year, month: LunarMonth) -> Result<u8> {
    match month {
        LunarMonth::Regular(m) => month_days(year, m),
        LunarMonth::Leap(m) => {
            let leap = leap_month(year)?;
            if leap == 0 || leap != m {
                return Err(Error::Precondition(format!(
                    "lunar year {year} has no leap month {m}"
                )));
            }
            leap_month_days(year)
        }
    }
}

/// Iterate over the month slots of `year` in calendar order, with their
/// lengths.  Yields 12 slots, or 13 when the year has a leap month.
///
/// # Example
/// ```
/// use nl_lunar::{month_slots, LunarMonth};
///
/// let slots: Vec<_> = month_slots(2023).unwrap().map(|(m, _)| m).collect();
/// assert_eq!(slots.len(), 13);
/// assert_eq!(slots[2], LunarMonth::Leap(2));
/// ```
pub fn month_slots(year: Year) -> Result<MonthSlots> {
    let info = year_table::entry(year)?;
    Ok(MonthSlots {
        info,
        leap: (info & 0xf) as u8,
        next: Some(LunarMonth::Regular(1)),
    })
}

/// Iterator returned by [`month_slots`].
#[derive(Debug, Clone)]
pub struct MonthSlots {
    info: u32,
    leap: u8,
    next: Option<LunarMonth>,
}

impl Iterator for MonthSlots {
    type Item = (LunarMonth, u8);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let days = match current {
            LunarMonth::Regular(m) => {
                if self.info & (0x10000 >> m) != 0 {
                    30
                } else {
                    29
                }
            }
            LunarMonth::Leap(_) => {
                if self.info & LEAP_LENGTH_BIT != 0 {
                    30
                } else {
                    29
                }
            }
        };
        self.next = match current {
            LunarMonth::Regular(m) if m == self.leap => Some(LunarMonth::Leap(m)),
            LunarMonth::Regular(12) | LunarMonth::Leap(12) => None,
            LunarMonth::Regular(m) | LunarMonth::Leap(m) => Some(LunarMonth::Regular(m + 1)),
        };
        Some((current, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_table::{FIRST_YEAR, LAST_YEAR};

    #[test]
    fn known_leap_months() {
        assert_eq!(leap_month(1900).unwrap(), 8);
        assert_eq!(leap_month(2020).unwrap(), 4);
        assert_eq!(leap_month(2023).unwrap(), 2);
        assert_eq!(leap_month(2025).unwrap(), 6);
        assert_eq!(leap_month(2100).unwrap(), 0);
        assert_eq!(leap_month_days(2023).unwrap(), 29);
        assert_eq!(leap_month_days(2024).unwrap(), 0);
    }

    #[test]
    fn known_year_lengths() {
        assert_eq!(year_days(2023).unwrap(), 384);
        assert_eq!(year_days(2024).unwrap(), 354);
    }

    #[test]
    fn month_bit_mapping() {
        // 2024 = 0x04b60: months 2, 5, 7, 8, 10, 11 are long.
        let long: Vec<u8> = (1..=12).filter(|&m| month_days(2024, m).unwrap() == 30).collect();
        assert_eq!(long, [2, 5, 7, 8, 10, 11]);
    }

    #[test]
    fn year_lengths_in_bounds() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let days = year_days(year).unwrap();
            assert!((353..=385).contains(&days), "{year} has {days} days");
        }
    }

    #[test]
    fn slots_sum_to_year_length() {
        for year in FIRST_YEAR..=LAST_YEAR {
            let slots: Vec<_> = month_slots(year).unwrap().collect();
            let expected = if leap_month(year).unwrap() > 0 { 13 } else { 12 };
            assert_eq!(slots.len(), expected, "slot count for {year}");
            let total: u16 = slots.iter().map(|&(_, d)| u16::from(d)).sum();
            assert_eq!(total, year_days(year).unwrap(), "slot total for {year}");
            for (month, days) in slots {
                assert_eq!(slot_days(year, month).unwrap(), days);
            }
        }
    }

    #[test]
    fn leap_slot_follows_its_ordinal() {
        let slots: Vec<_> = month_slots(2020).unwrap().map(|(m, _)| m).collect();
        assert_eq!(&slots[3..6], [LunarMonth::Regular(4), LunarMonth::Leap(4), LunarMonth::Regular(5)]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(leap_month(1899), Err(Error::OutOfRange { .. })));
        assert!(matches!(month_days(2024, 13), Err(Error::OutOfRange { .. })));
        assert!(matches!(month_days(2024, 0), Err(Error::OutOfRange { .. })));
        assert!(slot_days(2024, LunarMonth::Leap(3)).is_err());
    }
}
