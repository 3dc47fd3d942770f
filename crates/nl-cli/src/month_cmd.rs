//! Month command: a Sunday-first grid with a lunar annotation in each cell.

use anyhow::{anyhow, Result};
use nl_core::utilities::data_parsers::parse_year_month;
use nl_lunar::{convert, sexagenary_year_name, zodiac, FestivalCalendar, JointFestivalCalendar};
use nl_time::weekday::SUNDAY_FIRST;
use nl_time::Date;

use crate::cli::MonthArgs;
use crate::config::NongliConfig;
use crate::festivals_cmd::festival_calendar;

/// Blank cell, as wide as a filled one.
const EMPTY_CELL: &str = "       ";

/// Print the grid for the requested month, then its festivals.
pub fn run(args: MonthArgs, config: &NongliConfig) -> Result<()> {
    let first = match args.month.as_deref() {
        Some(text) => {
            let (year, month) =
                parse_year_month(text).ok_or_else(|| anyhow!("not a year-month: {text:?}"))?;
            Date::from_ymd(year, month, 1)?
        }
        None => Date::today().start_of_month(),
    };
    let calendar = festival_calendar(config)?;
    for line in render(first, &calendar) {
        println!("{line}");
    }
    Ok(())
}

/// Lines of the month grid starting at `first`, followed by one line per
/// festival day.
fn render(first: Date, calendar: &JointFestivalCalendar) -> Vec<String> {
    let last = first.end_of_month();
    let year = first.year();
    let mut lines = vec![format!(
        "{year}年{}月  {}年 [{}]",
        first.month(),
        sexagenary_year_name(year),
        zodiac(year)
    )];

    lines.push(
        SUNDAY_FIRST
            .iter()
            .map(|w| format!("   {}   ", w.short_name()))
            .collect::<Vec<_>>()
            .join(" "),
    );

    let mut row: Vec<String> =
        vec![EMPTY_CELL.to_owned(); usize::from(first.weekday().days_from_sunday())];
    let mut festival_lines = Vec::new();
    for date in first.iter_until(last) {
        let festivals = calendar.festivals(date);
        let marker = if festivals.is_empty() { ' ' } else { '*' };
        let lunar = convert(date);
        row.push(format!(
            "{:>2}{marker}{}",
            date.day_of_month(),
            lunar.display_label()
        ));
        if row.len() == SUNDAY_FIRST.len() {
            lines.push(row.join(" "));
            row.clear();
        }
        if !festivals.is_empty() {
            festival_lines.push(format!("{:>2}日  {}", date.day_of_month(), festivals.join("、")));
        }
    }
    if !row.is_empty() {
        lines.push(row.join(" "));
    }
    if !festival_lines.is_empty() {
        lines.push(String::new());
        lines.extend(festival_lines);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_2024_grid() {
        let first = Date::from_ymd(2024, 2, 1).unwrap();
        let lines = render(first, &JointFestivalCalendar::builtin());
        assert_eq!(lines[0], "2024年2月  甲辰年 [龙]");
        // 2024-02-01 is a Thursday: four blank cells first.
        assert!(lines[2].starts_with(&EMPTY_CELL.repeat(4)));
        assert!(lines[2].contains(" 1 廿二"));
        // 2024-02-04 is 立春, 2024-02-10 is 春节 (正月初一).
        assert!(lines[3].contains(" 4 立春"));
        assert!(lines[3].contains("10*正月"));
        assert!(lines.iter().any(|l| l == "10日  春节"));
        assert!(lines.iter().any(|l| l == "14日  情人节"));
    }

    #[test]
    fn grid_rows_cover_the_month() {
        // 2023-04-01 is a Saturday: 6 leading blanks plus 30 days.
        let first = Date::from_ymd(2023, 4, 1).unwrap();
        let lines = render(first, &JointFestivalCalendar::builtin());
        let rows = lines[2..].iter().take_while(|l| !l.is_empty()).count();
        assert_eq!(rows, 6);
        assert!(lines.iter().any(|l| l == " 1日  愚人节"));
    }
}
