//! Events command: edit the saved event list and drive reminders.

use anyhow::{bail, Context, Result};
use chrono::{Duration, Local, NaiveDateTime};
use nl_events::{
    export_json, import_json, Event, EventDraft, EventList, EventStore, JsonFileEventStore,
    LogNotifier, ReminderScheduler,
};
use nl_lunar::display_label;
use tracing::info;

use crate::cli::{EventsArgs, EventsCommand};
use crate::config::NongliConfig;

/// Run one event action against the configured store.
pub fn run(args: EventsArgs, config: &NongliConfig) -> Result<()> {
    let path = args.store.as_deref().unwrap_or(config.store.path.as_path());
    let mut store = JsonFileEventStore::new(path);
    let now = Local::now().naive_local();

    match args.action {
        EventsCommand::List { date, view } => {
            let list = load(&store)?;
            let events = match date {
                Some(anchor) => list.in_view(anchor, view),
                None => {
                    let mut all: Vec<&Event> = list.iter().collect();
                    all.sort_by_key(|e| e.start_time);
                    all
                }
            };
            if events.is_empty() {
                println!("没有事件");
            }
            for event in events {
                print_event(event);
            }
        }
        EventsCommand::Add {
            title,
            start,
            end,
            description,
            reminder,
            color,
        } => {
            let mut list = load(&store)?;
            let draft = EventDraft {
                title,
                description,
                start_time: start,
                end_time: end,
                color,
                reminder: reminder.unwrap_or(config.reminders.default),
            };
            let event = list.add(draft, now)?.clone();
            store.save(list.as_slice())?;
            info!(id = %event.id, title = %event.title, "event added");
            println!("已添加 {}", event.id);
            print_event(&event);
        }
        EventsCommand::Remove { id } => {
            let mut list = load(&store)?;
            let Some(event) = list.remove(&id) else {
                bail!("no event with id {id}");
            };
            store.save(list.as_slice())?;
            info!(id = %event.id, "event removed");
            println!("已删除 {} {}", event.id, event.title);
        }
        EventsCommand::Export { output } => {
            let json = export_json(&store)?;
            match output {
                Some(out) => {
                    std::fs::write(&out, json)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    info!(path = %out.display(), "events exported");
                }
                None => println!("{json}"),
            }
        }
        EventsCommand::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let n = import_json(&mut store, &json)
                .with_context(|| format!("failed to import {}", file.display()))?;
            println!("已导入 {n} 个事件");
        }
        EventsCommand::Clear => {
            store.clear()?;
            println!("已清除所有事件");
        }
        EventsCommand::Reminders { now: at } => {
            let at = at.unwrap_or(now);
            let list = load(&store)?;
            let mut scheduler = ReminderScheduler::new();
            scheduler.schedule_all(&list, at);
            if scheduler.is_empty() {
                println!("没有待提醒的事件");
            }
            for pending in scheduler.pending() {
                println!(
                    "{}  {}  {}",
                    pending.fire_at.format("%Y-%m-%d %H:%M"),
                    pending.event_id,
                    pending.notification.body.lines().next().unwrap_or_default()
                );
            }
        }
        EventsCommand::Notify { now: at, window } => {
            let at = at.unwrap_or(now);
            let sent = notify_window(&load(&store)?, at, window)?;
            println!("已发送 {sent} 条提醒");
        }
    }
    Ok(())
}

fn load(store: &JsonFileEventStore) -> Result<EventList> {
    let events = store
        .load()
        .with_context(|| format!("failed to load events from {}", store.path().display()))?;
    Ok(EventList::from_events(events))
}

/// Send every reminder whose fire time falls in `(at - window, at]`.
fn notify_window(list: &EventList, at: NaiveDateTime, window: u32) -> Result<usize> {
    let since = at - Duration::minutes(i64::from(window));
    let mut scheduler = ReminderScheduler::new();
    scheduler.schedule_all(list, since);
    Ok(scheduler.dispatch_due(at, &mut LogNotifier)?)
}

fn print_event(event: &Event) {
    let day = event.start_date();
    println!(
        "{}  {}  [{}]  {}  提醒: {}",
        event.id,
        event.time_range(),
        display_label(day),
        event.title,
        event.reminder
    );
    if let Some(description) = &event.description {
        println!("    {description}");
    }
}
