//! Festival tables and festival calendars.
//!
//! Two fixed tables ship with the crate: Gregorian-dated festivals keyed by
//! `(month, day)` and traditional festivals keyed by lunar `(month, day)`.
//! [`festivals_for`] consults both for one date.  The [`FestivalCalendar`]
//! trait lets callers stack the built-in tables with their own dated
//! entries through [`JointFestivalCalendar`].

use std::collections::BTreeMap;

use nl_core::Serial;
use nl_time::Date;
use serde::Serialize;

use crate::converter::convert;

/// Gregorian festivals as `(month, day, name)`.
pub const SOLAR_FESTIVALS: [(u8, u8, &str); 14] = [
    (1, 1, "元旦"),
    (2, 14, "情人节"),
    (3, 8, "妇女节"),
    (3, 12, "植树节"),
    (4, 1, "愚人节"),
    (5, 1, "劳动节"),
    (5, 4, "青年节"),
    (6, 1, "儿童节"),
    (7, 1, "建党节"),
    (8, 1, "建军节"),
    (9, 10, "教师节"),
    (10, 1, "国庆节"),
    (12, 24, "平安夜"),
    (12, 25, "圣诞节"),
];

/// Lunar festivals as `(lunar month, lunar day, name)`.
///
/// 除夕 is listed on 腊月三十 only, so it is absent in years whose 腊月
/// has 29 days.
pub const LUNAR_FESTIVALS: [(u8, u8, &str); 11] = [
    (1, 1, "春节"),
    (1, 15, "元宵节"),
    (2, 2, "龙抬头"),
    (5, 5, "端午节"),
    (7, 7, "七夕"),
    (7, 15, "中元节"),
    (8, 15, "中秋节"),
    (9, 9, "重阳节"),
    (12, 8, "腊八节"),
    (12, 23, "小年"),
    (12, 30, "除夕"),
];

fn lookup(table: &[(u8, u8, &'static str)], month: u8, day: u8) -> Vec<&'static str> {
    table
        .iter()
        .filter(|&&(m, d, _)| m == month && d == day)
        .map(|&(_, _, name)| name)
        .collect()
}

/// Gregorian festivals on `month`/`day`; empty if none.
pub fn solar_festivals(month: u8, day: u8) -> Vec<&'static str> {
    lookup(&SOLAR_FESTIVALS, month, day)
}

/// Lunar festivals on lunar `month`/`day`; empty if none.
///
/// The leap flag plays no part: a leap month's days match the festivals of
/// the ordinary month sharing its ordinal.
pub fn lunar_festivals(month: u8, day: u8) -> Vec<&'static str> {
    lookup(&LUNAR_FESTIVALS, month, day)
}

/// Festivals falling on one Gregorian date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalInfo {
    /// Matches from the Gregorian table.
    pub solar: Vec<&'static str>,
    /// Matches from the lunar table.
    pub lunar: Vec<&'static str>,
    /// `solar` then `lunar`, without duplicates.
    pub all: Vec<&'static str>,
    /// `true` if `all` is non-empty.
    pub has_any: bool,
}

/// Look up both festival tables for `date`.
///
/// The lunar side uses [`convert`], so outside the table span it matches
/// against the fallback month and day.
///
/// # Example
/// ```
/// use nl_lunar::festivals_for;
/// use nl_time::Date;
///
/// let info = festivals_for(Date::from_ymd(2024, 6, 10).unwrap());
/// assert_eq!(info.lunar, ["端午节"]);
/// assert!(info.has_any);
/// ```
pub fn festivals_for(date: Date) -> FestivalInfo {
    let lunar_date = convert(date);
    let solar = solar_festivals(date.month(), date.day_of_month());
    let lunar = lunar_festivals(lunar_date.lunar_month, lunar_date.lunar_day);
    let all = merge([solar.as_slice(), lunar.as_slice()]);
    FestivalInfo {
        has_any: !all.is_empty(),
        solar,
        lunar,
        all,
    }
}

/// Return `true` if any festival falls on `date`.
pub fn is_holiday(date: Date) -> bool {
    festivals_for(date).has_any
}

/// Order-preserving union that drops blank names and repeats.
fn merge<'a, I, S>(lists: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[&'a str]>,
{
    let mut out: Vec<&'a str> = Vec::new();
    for list in lists {
        for &name in list.as_ref() {
            if !name.trim().is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
    }
    out
}

// ── Festival calendars ────────────────────────────────────────────────────────

/// A source of named festivals.
pub trait FestivalCalendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Festival names on `date`, possibly empty.
    fn festivals(&self, date: Date) -> Vec<&str>;

    /// Return `true` if any festival falls on `date`.
    fn is_holiday(&self, date: Date) -> bool {
        !self.festivals(date).is_empty()
    }
}

/// The built-in Gregorian festival table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarFestivalCalendar;

impl FestivalCalendar for SolarFestivalCalendar {
    fn name(&self) -> &str {
        "公历节日"
    }

    fn festivals(&self, date: Date) -> Vec<&str> {
        solar_festivals(date.month(), date.day_of_month())
    }
}

/// The built-in lunar festival table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarFestivalCalendar;

impl FestivalCalendar for LunarFestivalCalendar {
    fn name(&self) -> &str {
        "农历节日"
    }

    fn festivals(&self, date: Date) -> Vec<&str> {
        let lunar = convert(date);
        lunar_festivals(lunar.lunar_month, lunar.lunar_day)
    }
}

/// A calendar whose festivals are added at run time, one date at a time.
#[derive(Debug, Clone)]
pub struct BespokeFestivalCalendar {
    name: String,
    festivals: BTreeMap<Serial, Vec<String>>,
}

impl BespokeFestivalCalendar {
    /// Create an empty calendar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            festivals: BTreeMap::new(),
        }
    }

    /// Name a festival on `date`.  Adding the same name twice is a no-op.
    pub fn add_festival(&mut self, date: Date, name: impl Into<String>) {
        let name = name.into();
        let names = self.festivals.entry(date.serial()).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Drop every festival on `date`.
    pub fn remove_festivals(&mut self, date: Date) {
        self.festivals.remove(&date.serial());
    }

    /// Number of dates carrying at least one festival.
    pub fn festival_count(&self) -> usize {
        self.festivals.len()
    }
}

impl FestivalCalendar for BespokeFestivalCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn festivals(&self, date: Date) -> Vec<&str> {
        self.festivals
            .get(&date.serial())
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Several festival calendars read as one, in the order given.
pub struct JointFestivalCalendar {
    calendars: Vec<Box<dyn FestivalCalendar>>,
    name: String,
}

impl std::fmt::Debug for JointFestivalCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JointFestivalCalendar")
            .field("name", &self.name)
            .field("calendars", &self.calendars.len())
            .finish()
    }
}

impl JointFestivalCalendar {
    /// Combine `calendars`; earlier calendars list their festivals first.
    pub fn new(calendars: Vec<Box<dyn FestivalCalendar>>) -> Self {
        let name = calendars
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ");
        Self { calendars, name }
    }

    /// The two built-in tables, Gregorian first.
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(SolarFestivalCalendar),
            Box::new(LunarFestivalCalendar),
        ])
    }

    /// Append another calendar after the existing ones.
    pub fn push(&mut self, calendar: Box<dyn FestivalCalendar>) {
        if self.name.is_empty() {
            self.name = calendar.name().to_owned();
        } else {
            self.name = format!("{}, {}", self.name, calendar.name());
        }
        self.calendars.push(calendar);
    }
}

impl FestivalCalendar for JointFestivalCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn festivals(&self, date: Date) -> Vec<&str> {
        merge(self.calendars.iter().map(|c| c.festivals(date)))
    }
}
