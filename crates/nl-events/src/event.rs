//! Event records and the in-memory event list.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use nl_core::ensure;
use nl_core::errors::{Error, Result};
use nl_time::Date;
use serde::{Deserialize, Serialize};

/// Event identifier: the creation instant in Unix milliseconds, as text.
pub type EventId = String;

// ── Reminder lead ─────────────────────────────────────────────────────────────

/// How long before an event's start its reminder fires.
///
/// Serialized as the Chinese label shown to users (`"15分钟前"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReminderLead {
    /// No reminder.
    #[default]
    #[serde(rename = "无")]
    Off,
    /// At the start time.
    #[serde(rename = "事件发生时")]
    AtStart,
    /// 5 minutes before.
    #[serde(rename = "5分钟前")]
    Minutes5,
    /// 15 minutes before.
    #[serde(rename = "15分钟前")]
    Minutes15,
    /// 30 minutes before.
    #[serde(rename = "30分钟前")]
    Minutes30,
    /// 1 hour before.
    #[serde(rename = "1小时前")]
    Hour1,
    /// 1 day before.
    #[serde(rename = "1天前")]
    Day1,
}

impl ReminderLead {
    /// Every lead, shortest first after [`ReminderLead::Off`].
    pub const ALL: [ReminderLead; 7] = [
        ReminderLead::Off,
        ReminderLead::AtStart,
        ReminderLead::Minutes5,
        ReminderLead::Minutes15,
        ReminderLead::Minutes30,
        ReminderLead::Hour1,
        ReminderLead::Day1,
    ];

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            ReminderLead::Off => "无",
            ReminderLead::AtStart => "事件发生时",
            ReminderLead::Minutes5 => "5分钟前",
            ReminderLead::Minutes15 => "15分钟前",
            ReminderLead::Minutes30 => "30分钟前",
            ReminderLead::Hour1 => "1小时前",
            ReminderLead::Day1 => "1天前",
        }
    }

    /// Time between the reminder and the event start; `None` when off.
    pub fn offset(&self) -> Option<Duration> {
        match self {
            ReminderLead::Off => None,
            ReminderLead::AtStart => Some(Duration::zero()),
            ReminderLead::Minutes5 => Some(Duration::minutes(5)),
            ReminderLead::Minutes15 => Some(Duration::minutes(15)),
            ReminderLead::Minutes30 => Some(Duration::minutes(30)),
            ReminderLead::Hour1 => Some(Duration::hours(1)),
            ReminderLead::Day1 => Some(Duration::days(1)),
        }
    }
}

impl fmt::Display for ReminderLead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReminderLead {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|lead| lead.label() == s)
            .ok_or_else(|| Error::MalformedInput(format!("unknown reminder lead {s:?}")))
    }
}

// ── Timestamps ────────────────────────────────────────────────────────────────

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a wall-clock timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a space separator,
/// and RFC 3339 instants with an offset, which are converted to local time.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(instant) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&chrono::Local).naive_local());
    }
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| Error::MalformedInput(format!("not a timestamp: {s:?}")))
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(super::TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        super::parse_timestamp(&text).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            t: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match t {
                Some(t) => super::serialize(t, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|text| crate::event::parse_timestamp(&text).map_err(de::Error::custom))
                .transpose()
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Short title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Local start time.
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    /// Local end time.
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    /// Display colour, e.g. `"#3498db"`.
    #[serde(default)]
    pub color: Option<String>,
    /// Reminder lead.
    #[serde(default)]
    pub reminder: ReminderLead,
    /// When the event was added.
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<NaiveDateTime>,
    /// When the event was last edited.
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Event {
    /// Gregorian date of the start time.
    pub fn start_date(&self) -> Date {
        Date::from(self.start_time.date())
    }

    /// `true` if the event starts and ends on the same day.
    pub fn is_single_day(&self) -> bool {
        self.start_time.date() == self.end_time.date()
    }

    /// The start-to-end range in display form.
    ///
    /// Same day: `2024年2月10日 10:00 - 11:00`; otherwise both ends in full.
    pub fn time_range(&self) -> String {
        const FULL: &str = "%Y年%-m月%-d日 %H:%M";
        let start = self.start_time.format(FULL);
        if self.is_single_day() {
            format!("{start} - {}", self.end_time.format("%H:%M"))
        } else {
            format!("{start} - {}", self.end_time.format(FULL))
        }
    }
}

/// The user-editable fields of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Short title; must not be blank.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Local start time.
    pub start_time: NaiveDateTime,
    /// Local end time; not before `start_time`.
    pub end_time: NaiveDateTime,
    /// Display colour.
    pub color: Option<String>,
    /// Reminder lead.
    pub reminder: ReminderLead,
}

impl EventDraft {
    /// A draft with only the required fields set.
    pub fn new(title: impl Into<String>, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start_time,
            end_time,
            color: None,
            reminder: ReminderLead::Off,
        }
    }

    /// Set the reminder lead.
    pub fn with_reminder(mut self, reminder: ReminderLead) -> Self {
        self.reminder = reminder;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the title is not blank and the event does not end before it starts.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.title.trim().is_empty(), "event title must not be blank");
        ensure!(
            self.end_time >= self.start_time,
            "event ends ({}) before it starts ({})",
            self.end_time,
            self.start_time
        );
        Ok(())
    }
}

// ── View ranges ───────────────────────────────────────────────────────────────

/// The span of dates a calendar view shows around an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// The anchor's Gregorian month.
    #[default]
    Month,
    /// The Sunday-to-Saturday week containing the anchor.
    Week,
    /// The anchor day only.
    Day,
}

impl ViewMode {
    /// First and last date (inclusive) shown for `anchor`.
    ///
    /// A week running past [`Date::MIN`] or [`Date::MAX`] is cut off there.
    pub fn range(&self, anchor: Date) -> (Date, Date) {
        match self {
            ViewMode::Month => (anchor.start_of_month(), anchor.end_of_month()),
            ViewMode::Week => {
                let offset = i32::from(anchor.weekday().days_from_sunday());
                let start = anchor.add_days(-offset).unwrap_or(Date::MIN);
                let end = anchor.add_days(6 - offset).unwrap_or(Date::MAX);
                (start, end)
            }
            ViewMode::Day => (anchor, anchor),
        }
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(Error::MalformedInput(format!("unknown view {other:?}"))),
        }
    }
}

// ── Event list ────────────────────────────────────────────────────────────────

/// An ordered collection of events with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventList {
    events: Vec<Event>,
}

impl EventList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap previously loaded events.
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Add a new event created at `now`.
    ///
    /// The id is `now` in Unix milliseconds, bumped until it is unused.
    ///
    /// # Errors
    /// [`Error::Precondition`] if the title is blank or the event ends
    /// before it starts.
    pub fn add(&mut self, draft: EventDraft, now: NaiveDateTime) -> Result<&Event> {
        draft.validate()?;
        let mut millis = now.and_utc().timestamp_millis();
        while self.get(&millis.to_string()).is_some() {
            millis += 1;
        }
        self.events.push(Event {
            id: millis.to_string(),
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            color: draft.color,
            reminder: draft.reminder,
            created_at: Some(now),
            updated_at: None,
        });
        Ok(&self.events[self.events.len() - 1])
    }

    /// Replace the editable fields of event `id`.
    ///
    /// # Errors
    /// [`Error::NotFound`] for an unknown id; validation errors as for
    /// [`EventList::add`].
    pub fn update(&mut self, id: &str, draft: EventDraft, now: NaiveDateTime) -> Result<&Event> {
        draft.validate()?;
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("event {id}")))?;
        event.title = draft.title;
        event.description = draft.description;
        event.start_time = draft.start_time;
        event.end_time = draft.end_time;
        event.color = draft.color;
        event.reminder = draft.reminder;
        event.updated_at = Some(now);
        Ok(event)
    }

    /// Remove and return event `id`.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    /// Look up event `id`.
    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events starting on `date`, earliest first.
    pub fn on_date(&self, date: Date) -> Vec<&Event> {
        self.between(date, date)
    }

    /// Events starting within `start..=end`, earliest first.
    pub fn between(&self, start: Date, end: Date) -> Vec<&Event> {
        let (start, end) = (NaiveDate::from(start), NaiveDate::from(end));
        let mut found: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| (start..=end).contains(&e.start_time.date()))
            .collect();
        found.sort_by_key(|e| e.start_time);
        found
    }

    /// Events shown by `view` around `anchor`.
    pub fn in_view(&self, anchor: Date, view: ViewMode) -> Vec<&Event> {
        let (start, end) = view.range(anchor);
        self.between(start, end)
    }

    /// All events in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// All events as a slice.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove every event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl From<EventList> for Vec<Event> {
    fn from(list: EventList) -> Self {
        list.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn lead_labels_round_trip() {
        for lead in ReminderLead::ALL {
            assert_eq!(lead.label().parse::<ReminderLead>().unwrap(), lead);
        }
        assert!(matches!(
            "10分钟前".parse::<ReminderLead>(),
            Err(Error::MalformedInput(_))
        ));
        assert_eq!(ReminderLead::Hour1.offset(), Some(Duration::minutes(60)));
        assert_eq!(ReminderLead::Off.offset(), None);
    }

    #[test]
    fn timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        for s in ["2024-02-10T10:30:00", "2024-02-10T10:30", "2024-02-10 10:30", "2024-02-10T10:30:00.000"] {
            assert_eq!(at(s), expected, "{s}");
        }
        assert!(parse_timestamp("10:30").is_err());
    }

    #[test]
    fn time_range_formats() {
        let mut list = EventList::new();
        let now = at("2024-02-01 09:00");
        let same_day = list
            .add(EventDraft::new("会议", at("2024-02-10 10:00"), at("2024-02-10 11:30")), now)
            .unwrap();
        assert_eq!(same_day.time_range(), "2024年2月10日 10:00 - 11:30");

        let trip = list
            .add(EventDraft::new("出差", at("2024-02-10 08:00"), at("2024-02-12 18:00")), now)
            .unwrap();
        assert_eq!(trip.time_range(), "2024年2月10日 08:00 - 2024年2月12日 18:00");
    }

    #[test]
    fn ids_are_unique_per_instant() {
        let mut list = EventList::new();
        let now = at("2024-02-01 09:00");
        let draft = EventDraft::new("a", at("2024-02-10 10:00"), at("2024-02-10 11:00"));
        let first = list.add(draft.clone(), now).unwrap().id.clone();
        let second = list.add(draft, now).unwrap().id.clone();
        assert_ne!(first, second);
        assert_eq!(first, now.and_utc().timestamp_millis().to_string());
    }

    #[test]
    fn rejects_invalid_drafts() {
        let mut list = EventList::new();
        let now = at("2024-02-01 09:00");
        let blank = EventDraft::new("  ", at("2024-02-10 10:00"), at("2024-02-10 11:00"));
        assert!(matches!(list.add(blank, now), Err(Error::Precondition(_))));
        let backwards = EventDraft::new("x", at("2024-02-10 10:00"), at("2024-02-10 09:00"));
        assert!(matches!(list.add(backwards, now), Err(Error::Precondition(_))));
        assert!(list.is_empty());
    }

    #[test]
    fn week_view_starts_on_sunday() {
        // 2024-02-14 is a Wednesday.
        let anchor = Date::from_ymd(2024, 2, 14).unwrap();
        let (start, end) = ViewMode::Week.range(anchor);
        assert_eq!(start, Date::from_ymd(2024, 2, 11).unwrap());
        assert_eq!(end, Date::from_ymd(2024, 2, 17).unwrap());
        let (start, end) = ViewMode::Month.range(anchor);
        assert_eq!((start.day_of_month(), end.day_of_month()), (1, 29));
        assert_eq!("Day".parse::<ViewMode>().unwrap(), ViewMode::Day);
    }

    #[test]
    fn week_view_is_cut_off_at_the_date_limits() {
        let (start, end) = ViewMode::Week.range(Date::MIN);
        assert_eq!(start, Date::MIN);
        assert_eq!(end.weekday().days_from_sunday(), 6);
        assert!(end - Date::MIN < 7);

        let (start, end) = ViewMode::Week.range(Date::MAX);
        assert_eq!(end, Date::MAX);
        assert_eq!(start.weekday().days_from_sunday(), 0);
        assert!(Date::MAX - start < 7);

        assert!(EventList::new().in_view(Date::MIN, ViewMode::Week).is_empty());
    }
}
