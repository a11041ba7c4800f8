//! snapcal command-line front end.
//!
//! # Responsibility
//! - Run extraction over OCR text files or stdin and print the candidate record.
//! - Schedule a reviewed record and print the schedule and both intents.
//! - Keep output machine-readable (JSON) for scripting.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::info;
use snapcal_core::{
    default_log_level, extract, init_logging, location_map_url, Clock, EventDraft, EventScheduler,
    SchedulerConfig, SystemClock, TimeZonePolicy,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "snapcal", version, about = "Turn scanned event notices into schedules")]
struct Cli {
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, global = true, env = "SNAPCAL_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true, env = "SNAPCAL_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract event fields from OCR text (file or stdin).
    Extract {
        /// Text file to read; stdin when omitted.
        input: Option<PathBuf>,
    },
    /// Validate a reviewed record and compute its schedule.
    Schedule {
        #[arg(long)]
        name: String,
        /// Date as YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// Time as h:mm AM/PM.
        #[arg(long)]
        time: String,
        #[arg(long)]
        location: String,
        /// How to read the wall-clock date/time: utc, local or an IANA zone.
        #[arg(long = "tz", env = "SNAPCAL_TIME_ZONE")]
        time_zone: TimeZonePolicy,
        /// Override the current instant (RFC 3339).
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Print the map search link for a location.
    MapLink { location: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir.to_str().context("log dir must be valid UTF-8")?;
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match cli.command {
        Command::Extract { input } => {
            let text = read_input(input.as_ref())?;
            let candidate = extract(&text);
            info!(
                "event=cli_extract module=cli status=ok missing_fields={}",
                candidate.missing_fields().len()
            );
            println!("{}", serde_json::to_string_pretty(&candidate)?);
        }
        Command::Schedule {
            name,
            date,
            time,
            location,
            time_zone,
            now,
        } => {
            let now = now.unwrap_or_else(|| SystemClock.now());
            let scheduler = EventScheduler::new(SchedulerConfig::new(time_zone));
            let draft = EventDraft::new(name, date, time, location);
            let scheduled = match scheduler.schedule_draft(&draft, now) {
                Ok(scheduled) => scheduled,
                Err(err) => bail!("cannot schedule event: {err}"),
            };
            info!(
                "event=cli_schedule module=cli status=ok reminder_delay_secs={}",
                scheduled.notification.fire_delay_secs()
            );
            println!("{}", serde_json::to_string_pretty(&scheduled)?);
        }
        Command::MapLink { location } => println!("{}", location_map_url(&location)),
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use snapcal_core::TimeZonePolicy;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn schedule_parses_time_zone_and_now() {
        let cli = Cli::try_parse_from([
            "snapcal",
            "schedule",
            "--name",
            "Demo",
            "--date",
            "2024-05-10",
            "--time",
            "3:30 PM",
            "--location",
            "X",
            "--tz",
            "Europe/Paris",
            "--now",
            "2024-05-10T10:00:00Z",
        ])
        .expect("schedule args should parse");

        match cli.command {
            Command::Schedule { time_zone, now, .. } => {
                assert_eq!(time_zone, "Europe/Paris".parse::<TimeZonePolicy>().unwrap());
                assert!(now.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn schedule_rejects_unknown_time_zone() {
        let result = Cli::try_parse_from([
            "snapcal", "schedule", "--name", "Demo", "--date", "2024-05-10", "--time",
            "3:30 PM", "--location", "X", "--tz", "Atlantis/Capital",
        ]);
        assert!(result.is_err());
    }
}
