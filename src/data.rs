use std::sync::Arc;

pub type ID = String;

/// Seconds since the start of the service day. Values past 86 400 belong to trips running
/// after midnight, negative values only appear once an early-running delay is applied.
pub type Time = i64;

pub const SERVICE_DAY: Time = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Linear interpolation towards `to`, component-wise on latitude and longitude.
    pub fn lerp(self, to: Coord, fraction: f64) -> Coord {
        Coord {
            lat: self.lat + fraction * (to.lat - self.lat),
            lon: self.lon + fraction * (to.lon - self.lon),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Stop {
    pub id: ID,
    pub name: String,
    pub coord: Coord,
}

#[derive(Debug, PartialEq)]
pub struct StopVisit {
    pub stop: Arc<Stop>,
    pub arrival_time: Time,
    pub departure_time: Time,
}

#[derive(Debug, PartialEq)]
pub struct Trip {
    pub id: ID,
    pub headsign: String,
    pub stop_visits: Vec<StopVisit>,
}
