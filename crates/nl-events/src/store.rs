//! Event persistence.

use std::fs;
use std::path::{Path, PathBuf};

use nl_core::errors::{Error, Result};
use nl_core::fail;

use crate::event::Event;

/// Somewhere events can be saved and loaded as a whole.
pub trait EventStore {
    /// Load every saved event; an empty store yields an empty list.
    fn load(&self) -> Result<Vec<Event>>;

    /// Replace the saved events with `events`.
    fn save(&mut self, events: &[Event]) -> Result<()>;

    /// Delete every saved event.
    fn clear(&mut self) -> Result<()>;
}

/// A store that lives only as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Vec<Event>,
}

impl MemoryEventStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventStore for MemoryEventStore {
    fn load(&self) -> Result<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn save(&mut self, events: &[Event]) -> Result<()> {
        self.events = events.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.events.clear();
        Ok(())
    }
}

/// A pretty-printed JSON array of events in one file.
///
/// A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileEventStore {
    path: PathBuf,
}

impl JsonFileEventStore {
    /// A store backed by `path`; nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_path(&self) -> Result<()> {
        if self.path.is_dir() {
            fail!("event store path {} is a directory", self.path.display());
        }
        Ok(())
    }
}

impl EventStore for JsonFileEventStore {
    fn load(&self) -> Result<Vec<Event>> {
        self.check_path()?;
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no saved events");
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let events = parse_events(&text)?;
        tracing::debug!(path = %self.path.display(), n = events.len(), "loaded events");
        Ok(events)
    }

    fn save(&mut self, events: &[Event]) -> Result<()> {
        self.check_path()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, to_json(events)?)?;
        tracing::debug!(path = %self.path.display(), n = events.len(), "saved events");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check_path()?;
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        tracing::debug!(path = %self.path.display(), "cleared events");
        Ok(())
    }
}

fn to_json(events: &[Event]) -> Result<String> {
    serde_json::to_string_pretty(events).map_err(|e| Error::Serialization(e.to_string()))
}

fn parse_events(text: &str) -> Result<Vec<Event>> {
    serde_json::from_str(text).map_err(|e| Error::MalformedInput(format!("event JSON: {e}")))
}

/// Everything in `store` as pretty-printed JSON.
pub fn export_json<S: EventStore + ?Sized>(store: &S) -> Result<String> {
    to_json(&store.load()?)
}

/// Replace the contents of `store` with the events in `json`.
///
/// Returns the number of events imported.  On a parse error the store is
/// left untouched.
///
/// # Errors
/// [`Error::MalformedInput`] if `json` is not an array of events.
pub fn import_json<S: EventStore + ?Sized>(store: &mut S, json: &str) -> Result<usize> {
    let events = parse_events(json)?;
    store.save(&events)?;
    tracing::debug!(n = events.len(), "imported events");
    Ok(events.len())
}
