//! Convert command: one Gregorian date to its lunar description.

use anyhow::{Context, Result};
use nl_lunar::{convert, festivals_for, FestivalCalendar, FestivalInfo, LunarDate};
use nl_time::Date;
use serde::Serialize;

use crate::cli::ConvertArgs;
use crate::config::NongliConfig;
use crate::festivals_cmd::festival_calendar;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertReport<'a> {
    date: String,
    weekday: String,
    lunar: &'a LunarDate,
    display_label: &'static str,
    full_label: String,
    festivals: FestivalInfo,
    personal_festivals: Vec<&'a str>,
}

/// Print the lunar date, labels and festivals for the requested date.
pub fn run(args: ConvertArgs, config: &NongliConfig) -> Result<()> {
    let date = args.date.unwrap_or_else(Date::today);
    let calendar = festival_calendar(config)?;
    let lunar = convert(date);

    let festivals = festivals_for(date);
    let personal: Vec<&str> = calendar
        .festivals(date)
        .into_iter()
        .filter(|name| !festivals.all.contains(name))
        .collect();

    if args.json {
        let report = ConvertReport {
            date: date.to_string(),
            weekday: date.weekday().to_string(),
            lunar: &lunar,
            display_label: lunar.display_label(),
            full_label: lunar.full_label(),
            festivals,
            personal_festivals: personal,
        };
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
        return Ok(());
    }

    println!("公历  {date} {}", date.weekday());
    println!("农历  {}", describe(&lunar));
    println!("生肖  {}", lunar.zodiac);
    if let Some(term) = lunar.solar_term {
        println!("节气  {term}");
    }
    let all: Vec<&str> = festivals.all.iter().copied().chain(personal).collect();
    if !all.is_empty() {
        println!("节日  {}", all.join("、"));
    }
    if !lunar.exact {
        println!("（超出 1900–2100 农历表范围，结果为近似值）");
    }
    Ok(())
}

/// Full label with the leap marker spelled out.
fn describe(lunar: &LunarDate) -> String {
    format!(
        "{}年 {}{}",
        lunar.sexagenary_year_name,
        lunar.month().long_name(),
        lunar.day_name
    )
}
