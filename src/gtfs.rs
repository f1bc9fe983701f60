use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize, Debug)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

#[derive(Deserialize, Debug)]
pub struct Trip {
    pub trip_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    #[serde(default)]
    pub trip_short_name: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct StopTime {
    pub trip_id: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub stop_id: String,
    pub stop_sequence: u32,
}

#[derive(Debug)]
pub struct Timetable {
    pub stops: Vec<Stop>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTime>,
}

impl Timetable {
    /// Reads an already extracted GTFS directory.
    pub fn from_dir(dir: &Path) -> Result<Self, LoadError> {
        Ok(Self {
            stops: deserialize_into(&dir.join("stops.txt"))?,
            trips: deserialize_into(&dir.join("trips.txt"))?,
            stop_times: deserialize_into(&dir.join("stop_times.txt"))?,
        })
    }
}

fn deserialize_into<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.display().to_string(),
        source,
    };

    tracing::debug!("Processing {}", path.display());
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?
        .deserialize()
        .map(move |parse_result| parse_result.map_err(csv_error))
        .collect()
}

/// Parses a GTFS `HH:MM:SS` time into seconds since the start of the service day.
/// Hours may exceed 23 for trips running past midnight.
pub fn parse_time(value: &str) -> Option<i64> {
    let mut parts = value.trim().split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let seconds: i64 = parts.next().map_or(Ok(0), |s| s.parse()).ok()?;

    if parts.next().is_some() || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return None;
    }

    Some(hours * 3600 + minutes * 60 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_time_accepts_service_day_overflow() {
        assert_eq!(parse_time("00:00:00"), Some(0));
        assert_eq!(parse_time("08:15:30"), Some(29_730));
        assert_eq!(parse_time("25:10:00"), Some(90_600));
        assert_eq!(parse_time(" 7:05:00"), Some(25_500));
    }

    #[test]
    fn parse_time_without_seconds() {
        assert_eq!(parse_time("12:30"), Some(45_000));
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("12"), None);
        assert_eq!(parse_time("12:61:00"), None);
        assert_eq!(parse_time("12:00:00:00"), None);
        assert_eq!(parse_time("ab:cd:ef"), None);
    }
}
