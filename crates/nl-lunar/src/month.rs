//! Lunar month slots and the fixed month/day name tables.

use serde::Serialize;

/// Month names, `正月` … `腊月`, indexed by ordinal − 1.
pub const MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
];

/// Day names, `初一` … `三十`, indexed by day − 1.
pub const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// One month slot of a lunar year.
///
/// A leap month shares its ordinal with the month it follows, so a year with
/// leap month 4 runs `Regular(1) … Regular(4), Leap(4), Regular(5) …
/// Regular(12)`.  Slots order by ordinal first, regular before leap, which
/// is the order they occur within the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LunarMonth {
    /// An ordinary month with ordinal 1–12.
    Regular(u8),
    /// An intercalary month repeating the given ordinal.
    Leap(u8),
}

impl LunarMonth {
    /// The ordinal 1–12, regardless of leap status.
    pub fn ordinal(&self) -> u8 {
        match *self {
            LunarMonth::Regular(n) | LunarMonth::Leap(n) => n,
        }
    }

    /// `true` for an intercalary month.
    pub fn is_leap(&self) -> bool {
        matches!(self, LunarMonth::Leap(_))
    }

    /// The table month name, without any leap marker (`"四月"`).
    pub fn name(&self) -> &'static str {
        month_name(self.ordinal())
    }

    /// The month name as commonly written, with `闰` for leap months
    /// (`"闰四月"`).
    pub fn long_name(&self) -> String {
        if self.is_leap() {
            format!("闰{}", self.name())
        } else {
            self.name().to_owned()
        }
    }
}

impl PartialOrd for LunarMonth {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LunarMonth {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.ordinal(), self.is_leap()).cmp(&(other.ordinal(), other.is_leap()))
    }
}

impl std::fmt::Display for LunarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.long_name())
    }
}

/// Name of month `ordinal`; an ordinal outside 1–12 falls back to `正月`.
pub fn month_name(ordinal: u8) -> &'static str {
    lookup(&MONTH_NAMES, ordinal)
}

/// Name of day `day`; a day outside 1–30 falls back to `初一`.
pub fn day_name(day: u8) -> &'static str {
    lookup(&DAY_NAMES, day)
}

fn lookup(table: &[&'static str], one_based: u8) -> &'static str {
    usize::from(one_based)
        .checked_sub(1)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(table[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_default_to_first() {
        assert_eq!(month_name(11), "冬月");
        assert_eq!(month_name(0), "正月");
        assert_eq!(month_name(13), "正月");
        assert_eq!(day_name(21), "廿一");
        assert_eq!(day_name(31), "初一");
    }

    #[test]
    fn leap_names() {
        assert_eq!(LunarMonth::Leap(2).long_name(), "闰二月");
        assert_eq!(LunarMonth::Regular(12).to_string(), "腊月");
        assert_eq!(LunarMonth::Leap(2).name(), "二月");
    }

    #[test]
    fn slot_order() {
        let mut slots = vec![
            LunarMonth::Regular(5),
            LunarMonth::Leap(4),
            LunarMonth::Regular(4),
        ];
        slots.sort();
        assert_eq!(
            slots,
            [LunarMonth::Regular(4), LunarMonth::Leap(4), LunarMonth::Regular(5)]
        );
    }
}
