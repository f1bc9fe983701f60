use std::path::PathBuf;

use chrono_tz::Tz;
use clap::Parser;

use crate::{clock, data::Time, gtfs};

#[derive(Parser, Debug)]
#[command(
    name = "delaymap",
    version,
    about = "Estimates live train positions from a GTFS timetable and a delay feed"
)]
pub struct Args {
    /// Directory holding stops.txt, trips.txt and stop_times.txt
    #[arg(short, long, env = "DELAYMAP_TIMETABLE")]
    pub timetable: PathBuf,

    /// Parsed delay feed as JSON, `-` reads standard input
    #[arg(short, long, env = "DELAYMAP_FEED", default_value = "-")]
    pub feed: String,

    /// CSV file with `label,translation` rows for headsigns and stop names
    #[arg(long, env = "DELAYMAP_TRANSLATIONS")]
    pub translations: Option<PathBuf>,

    /// Time zone the timetable is expressed in
    #[arg(long, env = "DELAYMAP_TIMEZONE", default_value = "Europe/Brussels", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Estimate at this service time (HH:MM:SS) instead of the current time
    #[arg(long, value_parser = parse_service_time)]
    pub at: Option<Time>,

    /// Attach scheduled and effective times to every estimate
    #[arg(long)]
    pub diagnostics: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn now(&self) -> Time {
        self.at.unwrap_or_else(|| clock::now_in(self.timezone))
    }
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .parse()
        .map_err(|_| format!("unknown time zone {value:?}"))
}

fn parse_service_time(value: &str) -> Result<Time, String> {
    gtfs::parse_time(value).ok_or_else(|| format!("expected HH:MM:SS, got {value:?}"))
}
