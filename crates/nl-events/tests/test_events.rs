//! Integration tests for event lists, stores and reminders.

use chrono::{Duration, NaiveDateTime};
use nl_events::{
    export_json, import_json, parse_timestamp, Event, EventDraft, EventList, EventStore,
    JsonFileEventStore, MemoryEventStore, Notification, ReminderLead, ReminderScheduler, ViewMode,
};
use nl_time::Date;
use proptest::prelude::*;

fn at(s: &str) -> NaiveDateTime {
    parse_timestamp(s).unwrap()
}

fn draft(title: &str, start: &str, end: &str, lead: ReminderLead) -> EventDraft {
    EventDraft::new(title, at(start), at(end)).with_reminder(lead)
}

fn seeded() -> EventList {
    let mut list = EventList::new();
    let now = at("2024-02-01 08:00");
    list.add(draft("团队会议", "2024-02-10 10:00", "2024-02-10 11:00", ReminderLead::Minutes15), now)
        .unwrap();
    list.add(draft("设计评审", "2024-02-10 14:30", "2024-02-10 15:30", ReminderLead::Hour1), now)
        .unwrap();
    list.add(draft("客户拜访", "2024-02-12 16:00", "2024-02-12 17:30", ReminderLead::Day1), now)
        .unwrap();
    list
}

// ─── Event list ───────────────────────────────────────────────────────────────

#[test]
fn crud() {
    let mut list = seeded();
    assert_eq!(list.len(), 3);

    let id = list.iter().next().unwrap().id.clone();
    let edited = list
        .update(
            &id,
            draft("周会", "2024-02-11 09:00", "2024-02-11 10:00", ReminderLead::Off),
            at("2024-02-02 12:00"),
        )
        .unwrap();
    assert_eq!(edited.title, "周会");
    assert_eq!(edited.updated_at, Some(at("2024-02-02 12:00")));
    assert_eq!(edited.created_at, Some(at("2024-02-01 08:00")));

    let stray = draft("x", "2024-02-11 09:00", "2024-02-11 10:00", ReminderLead::Off);
    assert!(list.update("missing", stray, at("2024-02-02 12:00")).is_err());

    let removed = list.remove(&id).unwrap();
    assert_eq!(removed.title, "周会");
    assert!(list.get(&id).is_none());
    assert!(list.remove(&id).is_none());
    assert_eq!(list.len(), 2);
}

#[test]
fn date_queries() {
    let list = seeded();
    let feb10 = Date::from_ymd(2024, 2, 10).unwrap();
    let titles: Vec<&str> = list.on_date(feb10).iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["团队会议", "设计评审"]);

    assert_eq!(list.in_view(feb10, ViewMode::Week).len(), 2);
    assert_eq!(list.in_view(feb10, ViewMode::Month).len(), 3);
    assert!(list.on_date(Date::from_ymd(2024, 2, 11).unwrap()).is_empty());
    assert_eq!(list.between(feb10 + 1, feb10 + 5).len(), 1);
}

// ─── Stores ───────────────────────────────────────────────────────────────────

#[test]
fn json_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileEventStore::new(dir.path().join("nested").join("events.json"));
    assert!(store.load().unwrap().is_empty());

    let list = seeded();
    store.save(list.as_slice()).unwrap();
    assert!(store.path().exists());
    assert_eq!(store.load().unwrap(), list.as_slice());

    store.clear().unwrap();
    assert!(!store.path().exists());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn directory_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileEventStore::new(dir.path());
    assert!(store.load().is_err());
}

#[test]
fn export_then_import_into_another_store() {
    let mut source = MemoryEventStore::new();
    source.save(seeded().as_slice()).unwrap();
    let json = export_json(&source).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut target = JsonFileEventStore::new(dir.path().join("events.json"));
    assert_eq!(import_json(&mut target, &json).unwrap(), 3);
    assert_eq!(target.load().unwrap(), source.load().unwrap());
}

#[test]
fn imports_browser_exports() {
    let json = r##"[
      {
        "id": "1707530400000",
        "title": "团队会议",
        "description": "每周团队例会",
        "startTime": "2024-02-10T02:00:00.000Z",
        "endTime": "2024-02-10T03:00:00.000Z",
        "color": "#3498db",
        "reminder": "15分钟前",
        "createdAt": null,
        "updatedAt": null
      },
      {
        "id": "2",
        "title": "无提醒",
        "startTime": "2024-02-11T09:00:00",
        "endTime": "2024-02-11T10:00:00"
      }
    ]"##;
    let mut store = MemoryEventStore::new();
    assert_eq!(import_json(&mut store, json).unwrap(), 2);

    let events: Vec<Event> = store.load().unwrap();
    let expected = chrono::DateTime::parse_from_rfc3339("2024-02-10T02:00:00.000Z")
        .unwrap()
        .with_timezone(&chrono::Local)
        .naive_local();
    assert_eq!(events[0].start_time, expected);
    assert_eq!(events[0].reminder, ReminderLead::Minutes15);
    assert_eq!(events[0].color.as_deref(), Some("#3498db"));
    assert_eq!(events[1].reminder, ReminderLead::Off);
    assert!(events[1].description.is_none());
    assert!(events[1].created_at.is_none());
}

#[test]
fn unknown_reminder_label_fails_import() {
    let json = r#"[{"id": "1", "title": "t", "startTime": "2024-02-10T10:00:00",
                   "endTime": "2024-02-10T11:00:00", "reminder": "10分钟前"}]"#;
    let mut store = MemoryEventStore::new();
    assert!(import_json(&mut store, json).is_err());
}

// ─── Reminders ────────────────────────────────────────────────────────────────

#[test]
fn reminder_times() {
    let list = seeded();
    let events: Vec<&Event> = list.iter().collect();
    let now = at("2024-02-09 12:00");
    assert_eq!(ReminderScheduler::reminder_time(events[0], now), Some(at("2024-02-10 09:45")));
    assert_eq!(ReminderScheduler::reminder_time(events[1], now), Some(at("2024-02-10 13:30")));
    // Fires exactly at `now`: already passed.
    assert_eq!(ReminderScheduler::reminder_time(events[2], at("2024-02-11 16:00")), None);
}

#[test]
fn schedule_cancel_and_dispatch() {
    let list = seeded();
    let mut scheduler = ReminderScheduler::new();
    let now = at("2024-02-09 12:00");
    assert_eq!(scheduler.schedule_all(&list, now), 3);

    let ids: Vec<String> = list.iter().map(|e| e.id.clone()).collect();
    assert_eq!(scheduler.active_ids(), [ids[0].as_str(), ids[1].as_str(), ids[2].as_str()]);
    assert_eq!(scheduler.next_due().unwrap().event_id, ids[0]);

    assert!(scheduler.cancel(&ids[1]));
    assert!(!scheduler.cancel(&ids[1]));

    let mut sent: Vec<Notification> = Vec::new();
    let n = scheduler.dispatch_due(at("2024-02-10 12:00"), &mut sent).unwrap();
    assert_eq!(n, 1);
    assert_eq!(sent[0].tag, ids[0]);
    assert!(sent[0].body.starts_with("团队会议\n开始时间: 2024年2月10日 10:00 - 11:00"));
    assert_eq!(scheduler.len(), 1);

    scheduler.clear();
    assert!(scheduler.is_empty());
    assert!(scheduler.next_due().is_none());
}

#[test]
fn rescheduling_replaces_the_pending_entry() {
    let mut list = seeded();
    let mut scheduler = ReminderScheduler::new();
    let now = at("2024-02-09 12:00");
    scheduler.schedule_all(&list, now);

    let id = list.iter().next().unwrap().id.clone();
    let edited = list
        .update(&id, draft("团队会议", "2024-02-10 16:00", "2024-02-10 17:00", ReminderLead::Minutes5), now)
        .unwrap()
        .clone();
    assert_eq!(scheduler.reschedule(&id, &edited, now), Some(at("2024-02-10 15:55")));
    assert_eq!(scheduler.len(), 3);

    let off = list
        .update(&id, draft("团队会议", "2024-02-10 16:00", "2024-02-10 17:00", ReminderLead::Off), now)
        .unwrap()
        .clone();
    assert_eq!(scheduler.reschedule(&id, &off, now), None);
    assert_eq!(scheduler.len(), 2);
}

proptest! {
    #[test]
    fn take_due_splits_at_now(offsets in proptest::collection::vec(1i64..10_000, 1..20), cut in 0i64..12_000) {
        let base = at("2024-01-01 00:00");
        let mut list = EventList::new();
        for (i, minutes) in offsets.iter().enumerate() {
            let start = base + Duration::minutes(*minutes);
            list.add(
                EventDraft::new(format!("e{i}"), start, start).with_reminder(ReminderLead::AtStart),
                base,
            )
            .unwrap();
        }
        let mut scheduler = ReminderScheduler::new();
        prop_assert_eq!(scheduler.schedule_all(&list, base), offsets.len());

        let now = base + Duration::minutes(cut);
        let due = scheduler.take_due(now);
        prop_assert!(due.iter().all(|p| p.fire_at <= now));
        prop_assert!(due.windows(2).all(|w| w[0].fire_at <= w[1].fire_at));
        prop_assert!(scheduler.pending().iter().all(|p| p.fire_at > now));
        prop_assert_eq!(due.len() + scheduler.len(), offsets.len());
    }
}
