//! Stem-branch (干支) year naming and the zodiac animal.
//!
//! All three cycles are anchored so that year 4 CE is 甲子 / 鼠.  They apply
//! to any integer year, including years outside the table span.

use nl_core::Year;

/// The ten heavenly stems (天干).
pub const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve earthly branches (地支).
pub const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// The twelve zodiac animals (生肖), aligned with [`EARTHLY_BRANCHES`].
pub const ZODIAC_ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

fn cycle(year: Year, len: usize) -> usize {
    (i64::from(year) - 4).rem_euclid(len as i64) as usize
}

/// Heavenly stem of `year`.
pub fn heavenly_stem(year: Year) -> &'static str {
    HEAVENLY_STEMS[cycle(year, 10)]
}

/// Earthly branch of `year`.
pub fn earthly_branch(year: Year) -> &'static str {
    EARTHLY_BRANCHES[cycle(year, 12)]
}

/// Zodiac animal of `year`.
pub fn zodiac(year: Year) -> &'static str {
    ZODIAC_ANIMALS[cycle(year, 12)]
}

/// Stem followed by branch, e.g. `"甲辰"` for 2024.
pub fn sexagenary_year_name(year: Year) -> String {
    format!("{}{}", heavenly_stem(year), earthly_branch(year))
}

/// Position of `year` in the sixty-year cycle, 0 (甲子) to 59 (癸亥).
pub fn sexagenary_index(year: Year) -> u8 {
    cycle(year, 60) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_years() {
        assert_eq!(sexagenary_year_name(2024), "甲辰");
        assert_eq!(zodiac(2024), "龙");
        assert_eq!(sexagenary_year_name(2023), "癸卯");
        assert_eq!(zodiac(2023), "兔");
        assert_eq!(sexagenary_year_name(1984), "甲子");
        assert_eq!(sexagenary_index(1984), 0);
        assert_eq!(sexagenary_index(2043), 59);
    }

    #[test]
    fn negative_years_wrap() {
        // Year 4 is 甲子, so year 3 closes the previous cycle.
        assert_eq!(sexagenary_year_name(3), "癸亥");
        assert_eq!(sexagenary_year_name(-56), "甲子");
        assert_eq!(sexagenary_index(-57), 59);
    }

    #[test]
    fn index_agrees_with_stem_and_branch() {
        for year in 1850..2150 {
            let i = usize::from(sexagenary_index(year));
            assert_eq!(HEAVENLY_STEMS[i % 10], heavenly_stem(year));
            assert_eq!(EARTHLY_BRANCHES[i % 12], earthly_branch(year));
        }
    }
}
