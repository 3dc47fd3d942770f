//! # nongli
//!
//! Chinese lunar calendar (农历) for Gregorian dates 1900–2100.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `nl-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! nongli = "0.1"
//! ```
//!
//! ```rust
//! use nongli::prelude::*;
//!
//! let date = Date::from_ymd(2024, 6, 10).unwrap();
//! let lunar = convert(date);
//! assert_eq!((lunar.lunar_month, lunar.lunar_day), (5, 5));
//! assert_eq!(display_label(date), "初五");
//! assert!(festivals_for(date).all.contains(&"端午节"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Errors, primitive aliases and input parsers.
pub use nl_core as core;

/// Gregorian dates and weekdays.
pub use nl_time as time;

/// Lunar conversion, solar terms, sexagenary names and festivals.
pub use nl_lunar as lunar;

/// Events, stores and reminders.
pub use nl_events as events;

/// The items most programs need.
pub mod prelude {
    pub use nl_core::{Error, Result};
    pub use nl_events::{
        Event, EventDraft, EventList, EventStore, JsonFileEventStore, Notifier, ReminderLead,
        ReminderScheduler,
    };
    pub use nl_lunar::{
        convert, display_label, festivals_for, full_label, is_holiday, FestivalCalendar,
        LunarDate, LunarMonth,
    };
    pub use nl_time::{Date, Weekday};
}
