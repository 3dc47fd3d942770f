//! # nl-events
//!
//! Calendar events kept alongside the lunar calendar: the [`Event`] record
//! and [`EventList`], whole-list persistence behind [`EventStore`], and
//! reminder scheduling with pluggable [`Notifier`]s.
//!
//! Nothing here depends on lunar types; events are keyed by Gregorian
//! dates and local wall-clock times.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Event records, reminder leads, view ranges and the event list.
pub mod event;

/// Event stores and JSON import/export.
pub mod store;

/// Reminder scheduling and notifiers.
pub mod reminder;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use event::{parse_timestamp, Event, EventDraft, EventId, EventList, ReminderLead, ViewMode};
pub use reminder::{
    LogNotifier, Notification, Notifier, PendingReminder, ReminderScheduler, NOTIFICATION_TITLE,
};
pub use store::{export_json, import_json, EventStore, JsonFileEventStore, MemoryEventStore};
