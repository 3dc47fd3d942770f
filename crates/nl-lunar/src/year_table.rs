//! Per-year lunar calendar data for 1900–2100.
//!
//! Each entry packs one lunar year into 20 bits:
//!
//! | bits   | meaning |
//! |--------|---------|
//! | 0–3    | leap-month ordinal (1–12), 0 if the year has none |
//! | 4–15   | one flag per ordinary month, month 1 in bit 15 down to month 12 in bit 4; set = 30 days, clear = 29 |
//! | 16     | leap-month length; set = 30 days, clear = 29 |
//!
//! Index = year − 1900.

use nl_core::errors::{Error, Result};
use nl_core::Year;

/// First lunar year covered by the table.
pub const FIRST_YEAR: Year = 1900;

/// Last lunar year covered by the table.
pub const LAST_YEAR: Year = 2100;

/// Number of table entries.
pub const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// Packed year data, one entry per lunar year 1900..=2100.
pub const LUNAR_INFO: [u32; YEAR_COUNT] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0,
    0x09ad0, 0x055d2, 0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540,
    0x0d6a0, 0x0ada2, 0x095b0, 0x14977, 0x04970, 0x0a4b0, 0x0b4b5, 0x06a50,
    0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, 0x06566, 0x0d4a0,
    0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950,
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2,
    0x0a950, 0x0b557, 0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573,
    0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, 0x0aea6, 0x0ab50, 0x04b60, 0x0aae4,
    0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, 0x096d0, 0x04dd5,
    0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6,
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46,
    0x0ab60, 0x09570, 0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58,
    0x055c0, 0x0ab60, 0x096d5, 0x092e0, 0x0c960, 0x0d954, 0x0d4a0, 0x0da50,
    0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, 0x0a950, 0x0b4a0,
    0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930,
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260,
    0x0ea65, 0x0d530, 0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0,
    0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, 0x0b5a0, 0x056d0, 0x055b2, 0x049b0,
    0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, 0x14b63, 0x09370,
    0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06aa0, 0x1a6c4, 0x0aae0,
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0,
    0x0a6d0, 0x055d4, 0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50,
    0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, 0x0b273, 0x06930, 0x07337, 0x06aa0,
    0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, 0x0e968, 0x0d520,
    0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252,
    0x0d520,
];

/// Return `Ok(())` if `year` lies inside the table span.
pub fn check_year(year: Year) -> Result<()> {
    if (FIRST_YEAR..=LAST_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(Error::out_of_range(
            "year",
            year,
            FIRST_YEAR.into(),
            LAST_YEAR.into(),
        ))
    }
}

/// Return the packed entry for `year`.
///
/// # Errors
/// [`Error::OutOfRange`] if `year` is outside 1900–2100.
pub fn entry(year: Year) -> Result<u32> {
    check_year(year)?;
    Ok(LUNAR_INFO[(year - FIRST_YEAR) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_span() {
        assert_eq!(LUNAR_INFO.len(), 201);
        assert_eq!(entry(1900).unwrap(), 0x04bd8);
        assert_eq!(entry(2100).unwrap(), 0x0d520);
    }

    #[test]
    fn entries_fit_in_twenty_bits() {
        for (i, &info) in LUNAR_INFO.iter().enumerate() {
            assert!(info < 1 << 17, "entry {i} has bits above 16");
            assert!(info & 0xf <= 12, "entry {i} has leap ordinal > 12");
        }
    }

    #[test]
    fn out_of_range_years() {
        assert!(matches!(entry(1899), Err(Error::OutOfRange { value: 1899, .. })));
        assert!(matches!(entry(2101), Err(Error::OutOfRange { value: 2101, .. })));
    }
}
