//! Data parsing helpers.
//!
//! Parse dates and year-months from the textual forms users type on the
//! command line or store in files.  The parsers only split and convert
//! numbers; calendar validation (e.g. 2023-02-29) is left to
//! `nl_time::Date`.

/// Parse a date string in ISO 8601 format (`YYYY-MM-DD`).
///
/// Returns `(year, month, day)` on success.
pub fn parse_iso_date(s: &str) -> Option<(i32, u8, u8)> {
    split_three(s.trim(), '-')
}

/// Parse a date string in `YYYY/MM/DD` format.
pub fn parse_date_slash(s: &str) -> Option<(i32, u8, u8)> {
    split_three(s.trim(), '/')
}

/// Parse a date written the Chinese way, `2024年2月10日`.
///
/// The trailing `日` is optional.
pub fn parse_chinese_date(s: &str) -> Option<(i32, u8, u8)> {
    let s = s.trim();
    let s = s.strip_suffix('日').unwrap_or(s);
    let (year, rest) = s.split_once('年')?;
    let (month, day) = rest.split_once('月')?;
    Some((
        year.trim().parse().ok()?,
        month.trim().parse().ok()?,
        day.trim().parse().ok()?,
    ))
}

/// Parse a date in any of the supported formats.
///
/// Tries ISO first, then slashes, then the Chinese form.
pub fn parse_date(s: &str) -> Option<(i32, u8, u8)> {
    parse_iso_date(s)
        .or_else(|| parse_date_slash(s))
        .or_else(|| parse_chinese_date(s))
}

/// Parse a year-month string like `"2024-02"` or `"2024/2"`.
pub fn parse_year_month(s: &str) -> Option<(i32, u8)> {
    let s = s.trim();
    let (year, month) = s.split_once('-').or_else(|| s.split_once('/'))?;
    let year: i32 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    Some((year, month))
}

fn split_three(s: &str, sep: char) -> Option<(i32, u8, u8)> {
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u8 = parts[1].parse().ok()?;
    let day: u8 = parts[2].parse().ok()?;
    Some((year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-02-10"), Some((2024, 2, 10)));
        assert_eq!(parse_iso_date(" 2023-1-22 "), Some((2023, 1, 22)));
        assert_eq!(parse_iso_date("bad"), None);
        assert_eq!(parse_iso_date("2024-02"), None);
    }

    #[test]
    fn test_parse_date_slash() {
        assert_eq!(parse_date_slash("2024/06/10"), Some((2024, 6, 10)));
        assert_eq!(parse_date_slash("10/06"), None);
    }

    #[test]
    fn test_parse_chinese_date() {
        assert_eq!(parse_chinese_date("2024年9月17日"), Some((2024, 9, 17)));
        assert_eq!(parse_chinese_date("2024年9月17"), Some((2024, 9, 17)));
        assert_eq!(parse_chinese_date("九月十七"), None);
    }

    #[test]
    fn test_parse_date_any() {
        assert_eq!(parse_date("2024-02-10"), Some((2024, 2, 10)));
        assert_eq!(parse_date("2024/02/10"), Some((2024, 2, 10)));
        assert_eq!(parse_date("2024年2月10日"), Some((2024, 2, 10)));
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2024-02"), Some((2024, 2)));
        assert_eq!(parse_year_month("2024/12"), Some((2024, 12)));
        assert_eq!(parse_year_month("2024"), None);
        assert_eq!(parse_year_month("2024-xx"), None);
    }
}
