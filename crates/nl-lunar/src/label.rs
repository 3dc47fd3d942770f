//! Calendar-cell annotations for a Gregorian date.

use nl_time::Date;

use crate::converter::convert;

/// Short annotation for one calendar cell: the solar term if one falls on
/// `date`, else the lunar month name on the first of a month, else the
/// lunar day name.
///
/// # Example
/// ```
/// use nl_lunar::display_label;
/// use nl_time::Date;
///
/// assert_eq!(display_label(Date::from_ymd(2024, 2, 10).unwrap()), "正月");
/// assert_eq!(display_label(Date::from_ymd(2024, 2, 4).unwrap()), "立春");
/// ```
pub fn display_label(date: Date) -> &'static str {
    convert(date).display_label()
}

/// Full lunar description, e.g. `"甲辰年 八月十五"`.
pub fn full_label(date: Date) -> String {
    convert(date).full_label()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_names_between_months() {
        let d = Date::from_ymd(2024, 2, 11).unwrap();
        assert_eq!(display_label(d), "初二");
        assert_eq!(full_label(d), "甲辰年 正月初二");
    }

    #[test]
    fn fallback_still_labels() {
        let d = Date::from_ymd(2101, 3, 5).unwrap();
        assert_eq!(display_label(d), "初五");
        assert_eq!(full_label(d), "辛酉年 三月初五");
    }
}
