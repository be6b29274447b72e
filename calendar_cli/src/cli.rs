use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Calendar arithmetic for user-defined calendars.
#[derive(Parser)]
#[command(name = "calendar", version, about = "Convert between day counts and calendar dates")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Calendar definition file (.json or .toml).
    #[arg(short, long, global = true, conflicts_with = "preset")]
    pub calendar: Option<PathBuf>,

    /// Built-in calendar to use when no file is given.
    #[arg(short, long, global = true, default_value = "harptos")]
    pub preset: String,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the date of an absolute day.
    Date(DateArgs),
    /// Find the absolute day of a date.
    Day(DayArgs),
    /// Show season, sunrise/sunset and light for a day.
    Sun(SunArgs),
    /// Advance a saved calendar clock.
    Advance(AdvanceArgs),
    /// List built-in calendars.
    Presets,
}

/// Arguments for the `date` subcommand.
#[derive(clap::Args)]
pub struct DateArgs {
    /// Absolute day (may be negative).
    #[arg(allow_negative_numbers = true)]
    pub day: i64,
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    #[arg(allow_negative_numbers = true)]
    pub year: i64,

    /// Month number, starting at 1.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub month: u32,

    /// Day of the month, starting at 1.
    pub day_of_month: u32,
}

/// Arguments for the `sun` subcommand.
#[derive(clap::Args)]
pub struct SunArgs {
    #[arg(allow_negative_numbers = true)]
    pub day: i64,

    /// Time of day as HH:MM or minutes after midnight (default 12:00).
    #[arg(short, long, value_parser = parse_time_of_day)]
    pub time: Option<u32>,

    /// Region whose seasons take precedence.
    #[arg(short, long)]
    pub region: Option<String>,
}

/// Arguments for the `advance` subcommand.
#[derive(clap::Args)]
pub struct AdvanceArgs {
    /// State file; created at day 0, 00:00 if missing.
    #[arg(short, long)]
    pub state: PathBuf,

    /// Minutes to move the clock forward.
    #[arg(short, long)]
    pub minutes: i64,

    /// Name recorded in the lock file.
    #[arg(long, default_value = "calendar-cli")]
    pub user: String,
}

/// Parse `HH:MM` or a plain minute count into minutes after midnight.
pub fn parse_time_of_day(value: &str) -> Result<u32, String> {
    let minutes = match value.split_once(':') {
        Some((hours, minutes)) => {
            let hours: u32 = hours.trim().parse().map_err(|_| format!("invalid hour in '{value}'"))?;
            let minutes: u32 = minutes
                .trim()
                .parse()
                .map_err(|_| format!("invalid minute in '{value}'"))?;
            if minutes >= 60 {
                return Err(format!("invalid minute in '{value}'"));
            }
            hours * 60 + minutes
        }
        None => value.trim().parse().map_err(|_| format!("invalid time '{value}'"))?,
    };
    if minutes >= calendar_core::MINUTES_PER_DAY {
        return Err(format!("'{value}' is past the end of the day"));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_clock_and_minutes() {
        assert_eq!(parse_time_of_day("06:30"), Ok(390));
        assert_eq!(parse_time_of_day("0:00"), Ok(0));
        assert_eq!(parse_time_of_day("1439"), Ok(1439));
    }

    #[test]
    fn test_rejects_bad_times() {
        assert!(parse_time_of_day("24:00").is_err());
        assert!(parse_time_of_day("12:60").is_err());
        assert!(parse_time_of_day("1440").is_err());
        assert!(parse_time_of_day("noon").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["calendar", "-vv", "--json", "date", "-5"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(matches!(cli.command, Command::Date(DateArgs { day: -5 })));

        let cli = Cli::try_parse_from(["calendar", "day", "1492", "0", "1"]);
        assert!(cli.is_err());
    }
}
