//! Festivals command, plus the festival calendar shared by the other
//! date commands.

use anyhow::{Context, Result};
use nl_lunar::{festivals_for, BespokeFestivalCalendar, FestivalCalendar, JointFestivalCalendar};
use nl_time::Date;

use crate::cli::FestivalsArgs;
use crate::config::NongliConfig;

/// Built-in festivals followed by the personal ones from config.
pub fn festival_calendar(config: &NongliConfig) -> Result<JointFestivalCalendar> {
    let mut calendar = JointFestivalCalendar::builtin();
    if !config.festivals.is_empty() {
        let mut personal = BespokeFestivalCalendar::new("个人节日");
        for festival in &config.festivals {
            let date: Date = festival
                .date
                .parse()
                .with_context(|| format!("bad date for festival {:?}", festival.name))?;
            personal.add_festival(date, festival.name.clone());
        }
        tracing::debug!(n = personal.festival_count(), "loaded personal festivals");
        calendar.push(Box::new(personal));
    }
    Ok(calendar)
}

/// Print the festivals on the requested date, grouped by source.
pub fn run(args: FestivalsArgs, config: &NongliConfig) -> Result<()> {
    let date = args.date.unwrap_or_else(Date::today);
    let calendar = festival_calendar(config)?;
    let builtin = festivals_for(date);

    println!("{date} {}", date.weekday());
    let sources = [
        ("公历", builtin.solar),
        ("农历", builtin.lunar),
        ("个人", personal_only(&calendar, date)),
    ];
    let mut any = false;
    for (source, names) in &sources {
        for name in names {
            println!("  {source}  {name}");
            any = true;
        }
    }
    if !any {
        println!("  无节日");
    }
    Ok(())
}

fn personal_only<'a>(calendar: &'a JointFestivalCalendar, date: Date) -> Vec<&'a str> {
    let builtin = JointFestivalCalendar::builtin();
    let known = builtin.festivals(date);
    calendar
        .festivals(date)
        .into_iter()
        .filter(|name| !known.contains(name))
        .collect()
}
