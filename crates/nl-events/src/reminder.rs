//! Reminder scheduling and notification dispatch.
//!
//! The scheduler holds one pending reminder per event id.  It keeps no
//! clock of its own: callers pass `now` and poll [`ReminderScheduler::take_due`]
//! or [`ReminderScheduler::dispatch_due`].

use std::collections::HashMap;

use chrono::NaiveDateTime;
use nl_core::errors::Result;

use crate::event::{Event, EventId};

/// Title used on every reminder notification.
pub const NOTIFICATION_TITLE: &str = "📅 日历提醒";

/// A message for the user about one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Event id; a newer notification with the same tag replaces an older one.
    pub tag: EventId,
    /// Heading.
    pub title: String,
    /// Event title, time range and description, one per line.
    pub body: String,
}

impl Notification {
    /// Build the reminder notification for `event`.
    pub fn for_event(event: &Event) -> Self {
        let mut body = format!("{}\n开始时间: {}", event.title, event.time_range());
        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            body.push_str("\n描述: ");
            body.push_str(description);
        }
        Self {
            tag: event.id.clone(),
            title: NOTIFICATION_TITLE.to_owned(),
            body,
        }
    }
}

/// Delivers notifications to the user.
pub trait Notifier {
    /// Deliver one notification.
    fn notify(&mut self, notification: &Notification) -> Result<()>;
}

/// Writes each notification to the log at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &Notification) -> Result<()> {
        tracing::info!(
            tag = %notification.tag,
            title = %notification.title,
            body = %notification.body,
            "reminder"
        );
        Ok(())
    }
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) -> Result<()> {
        self.push(notification.clone());
        Ok(())
    }
}

/// A reminder waiting to fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminder {
    /// The event it belongs to.
    pub event_id: EventId,
    /// When it fires.
    pub fire_at: NaiveDateTime,
    /// What it shows, captured when scheduled.
    pub notification: Notification,
}

/// Pending reminders keyed by event id.
#[derive(Debug, Clone, Default)]
pub struct ReminderScheduler {
    pending: HashMap<EventId, PendingReminder>,
}

impl ReminderScheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// When `event`'s reminder fires, or `None` if it has no reminder or
    /// the time is not after `now`.
    pub fn reminder_time(event: &Event, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let fire_at = event.start_time - event.reminder.offset()?;
        if fire_at <= now {
            tracing::debug!(id = %event.id, title = %event.title, "reminder time already passed");
            return None;
        }
        Some(fire_at)
    }

    /// Schedule `event`, replacing any reminder already pending for its id.
    ///
    /// Returns the fire time, or `None` if nothing was scheduled.
    pub fn schedule(&mut self, event: &Event, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.cancel(&event.id);
        let fire_at = Self::reminder_time(event, now)?;
        tracing::debug!(
            id = %event.id,
            title = %event.title,
            minutes = (fire_at - now).num_minutes(),
            "scheduled reminder"
        );
        self.pending.insert(
            event.id.clone(),
            PendingReminder {
                event_id: event.id.clone(),
                fire_at,
                notification: Notification::for_event(event),
            },
        );
        Some(fire_at)
    }

    /// Schedule every event in `events`; returns how many were scheduled.
    pub fn schedule_all<'a, I>(&mut self, events: I, now: NaiveDateTime) -> usize
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events
            .into_iter()
            .filter(|event| self.schedule(event, now).is_some())
            .count()
    }

    /// Drop the reminder for `id`; returns `true` if one was pending.
    pub fn cancel(&mut self, id: &str) -> bool {
        let removed = self.pending.remove(id).is_some();
        if removed {
            tracing::debug!(id, "cancelled reminder");
        }
        removed
    }

    /// Cancel `old_id` and schedule the edited `event`.
    pub fn reschedule(
        &mut self,
        old_id: &str,
        event: &Event,
        now: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        self.cancel(old_id);
        self.schedule(event, now)
    }

    /// Drop every pending reminder.
    pub fn clear(&mut self) {
        for id in self.pending.keys() {
            tracing::debug!(id = %id, "cleared reminder");
        }
        self.pending.clear();
    }

    /// Ids with a pending reminder, soonest first.
    pub fn active_ids(&self) -> Vec<&str> {
        self.sorted().into_iter().map(|p| p.event_id.as_str()).collect()
    }

    /// Pending reminders, soonest first.
    pub fn pending(&self) -> Vec<&PendingReminder> {
        self.sorted()
    }

    /// The reminder that fires next.
    pub fn next_due(&self) -> Option<&PendingReminder> {
        self.pending
            .values()
            .min_by(|a, b| (a.fire_at, &a.event_id).cmp(&(b.fire_at, &b.event_id)))
    }

    /// Remove and return every reminder with a fire time at or before
    /// `now`, soonest first.
    pub fn take_due(&mut self, now: NaiveDateTime) -> Vec<PendingReminder> {
        let due: Vec<EventId> = self
            .pending
            .values()
            .filter(|p| p.fire_at <= now)
            .map(|p| p.event_id.clone())
            .collect();
        let mut taken: Vec<PendingReminder> = due
            .iter()
            .filter_map(|id| self.pending.remove(id))
            .collect();
        taken.sort_by(|a, b| (a.fire_at, &a.event_id).cmp(&(b.fire_at, &b.event_id)));
        taken
    }

    /// Send every due reminder through `notifier`; returns how many were sent.
    ///
    /// Stops at the first delivery error.  The reminder that failed and those
    /// after it stay pending for the next call.
    pub fn dispatch_due(&mut self, now: NaiveDateTime, notifier: &mut dyn Notifier) -> Result<usize> {
        let mut due = self.take_due(now);
        let mut sent = 0;
        while sent < due.len() {
            let reminder = &due[sent];
            if let Err(e) = notifier.notify(&reminder.notification) {
                tracing::warn!(id = %reminder.event_id, error = %e, "reminder delivery failed");
                for unsent in due.drain(sent..) {
                    self.pending.insert(unsent.event_id.clone(), unsent);
                }
                return Err(e);
            }
            tracing::info!(id = %reminder.event_id, fire_at = %reminder.fire_at, "reminder sent");
            sent += 1;
        }
        Ok(sent)
    }

    /// Number of pending reminders.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn sorted(&self) -> Vec<&PendingReminder> {
        let mut all: Vec<&PendingReminder> = self.pending.values().collect();
        all.sort_by(|a, b| (a.fire_at, &a.event_id).cmp(&(b.fire_at, &b.event_id)));
        all
    }
}
