use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use nl_events::{parse_timestamp, ReminderLead, ViewMode};
use nl_time::Date;

/// Chinese lunar calendar and event reminders.
#[derive(Parser)]
#[command(
    name = "nongli",
    version,
    about = "Chinese lunar calendar (1900–2100) with festivals and event reminders"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true, default_value = "nongli.toml")]
    pub config: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the lunar date, solar term and festivals for a date.
    Convert(ConvertArgs),
    /// Print a month grid annotated with lunar days and solar terms.
    Month(MonthArgs),
    /// List the festivals falling on a date.
    Festivals(FestivalsArgs),
    /// Manage saved events and their reminders.
    Events(EventsArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Gregorian date (2024-02-10, 2024/02/10 or 2024年2月10日); defaults to today.
    pub date: Option<Date>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `month` subcommand.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Year and month (2024-02 or 2024/02); defaults to the current month.
    pub month: Option<String>,
}

/// Arguments for the `festivals` subcommand.
#[derive(clap::Args)]
pub struct FestivalsArgs {
    /// Gregorian date; defaults to today.
    pub date: Option<Date>,
}

/// Arguments for the `events` subcommand.
#[derive(clap::Args)]
pub struct EventsArgs {
    /// Override the event file path from config.
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Event action.
    #[command(subcommand)]
    pub action: EventsCommand,
}

/// Event actions.
#[derive(Subcommand)]
pub enum EventsCommand {
    /// List events, optionally limited to a view around a date.
    List {
        /// Anchor date for the view; without it every event is listed.
        #[arg(short, long)]
        date: Option<Date>,

        /// View around the anchor date: month, week or day.
        #[arg(long, default_value = "day")]
        view: ViewMode,
    },
    /// Add an event.
    Add {
        /// Event title.
        #[arg(short, long)]
        title: String,

        /// Start time (2024-02-10 10:00).
        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        /// End time (2024-02-10 11:00).
        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,

        /// Description.
        #[arg(short, long)]
        description: Option<String>,

        /// Reminder lead (无, 事件发生时, 5分钟前, 15分钟前, 30分钟前, 1小时前, 1天前);
        /// defaults to the configured lead.
        #[arg(short, long)]
        reminder: Option<ReminderLead>,

        /// Display colour, e.g. "#3498db".
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove an event by id.
    Remove {
        /// Event id.
        id: String,
    },
    /// Print every event as JSON, or write it to a file.
    Export {
        /// Output file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace every event with those in a JSON file.
    Import {
        /// JSON file produced by `export`.
        file: PathBuf,
    },
    /// Delete every event.
    Clear,
    /// Show pending reminder times.
    Reminders {
        /// Reference time; defaults to now.
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<NaiveDateTime>,
    },
    /// Send reminders that fell due within the last polling window.
    Notify {
        /// Reference time; defaults to now.
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<NaiveDateTime>,

        /// Polling window in minutes.
        #[arg(long, default_value_t = 1)]
        window: u32,
    },
}
