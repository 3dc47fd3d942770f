use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nl_events::ReminderLead;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct NongliConfig {
    /// Event storage settings.
    #[serde(default)]
    pub store: StoreToml,

    /// Reminder settings.
    #[serde(default)]
    pub reminders: RemindersToml,

    /// Personal festivals shown alongside the built-in ones.
    #[serde(default)]
    pub festivals: Vec<FestivalToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreToml {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreToml {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("nongli-events.json")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemindersToml {
    #[serde(default = "default_lead")]
    pub default: ReminderLead,
}

impl Default for RemindersToml {
    fn default() -> Self {
        Self {
            default: default_lead(),
        }
    }
}

fn default_lead() -> ReminderLead {
    ReminderLead::Minutes15
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FestivalToml {
    /// Gregorian date, any format `nongli convert` accepts.
    pub date: String,
    pub name: String,
}

impl NongliConfig {
    /// Read `path`, or fall back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: NongliConfig = toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = NongliConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.store.path, PathBuf::from("nongli-events.json"));
        assert_eq!(config.reminders.default, ReminderLead::Minutes15);
        assert!(config.festivals.is_empty());
    }

    #[test]
    fn parses_full_file() {
        let config: NongliConfig = toml::from_str(
            r#"
            [store]
            path = "/tmp/events.json"

            [reminders]
            default = "1小时前"

            [[festivals]]
            date = "2024-05-20"
            name = "纪念日"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/events.json"));
        assert_eq!(config.reminders.default, ReminderLead::Hour1);
        assert_eq!(config.festivals[0].name, "纪念日");
    }

    #[test]
    fn rejects_unknown_keys_and_leads() {
        assert!(toml::from_str::<NongliConfig>("[store]\nfile = \"x\"").is_err());
        assert!(toml::from_str::<NongliConfig>("[reminders]\ndefault = \"10分钟前\"").is_err());
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nongli.toml");
        std::fs::write(&path, "[store\n").unwrap();
        let err = NongliConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }
}
