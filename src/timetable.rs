use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use itertools::Itertools;

use crate::{data::*, error::LoadError, gtfs};

/// Read access to the static schedule.
pub trait TimetableStore {
    fn lookup_trip(&self, trip_id: &str) -> Option<Arc<Trip>>;
}

#[derive(Debug, Default)]
pub struct Timetable {
    pub stops: HashMap<ID, Arc<Stop>>,
    pub trips: HashMap<ID, Arc<Trip>>,
}

impl Timetable {
    pub fn from_dir(dir: &Path) -> Result<Self, LoadError> {
        Self::try_from(gtfs::Timetable::from_dir(dir)?)
    }

    pub fn from_parts(stops: Vec<Arc<Stop>>, trips: Vec<Trip>) -> Self {
        Self {
            stops: stops
                .into_iter()
                .map(|stop| (stop.id.to_owned(), stop))
                .collect(),
            trips: trips
                .into_iter()
                .map(|trip| (trip.id.to_owned(), Arc::new(trip)))
                .collect(),
        }
    }
}

impl TimetableStore for Timetable {
    fn lookup_trip(&self, trip_id: &str) -> Option<Arc<Trip>> {
        self.trips.get(trip_id).cloned()
    }
}

impl TryFrom<gtfs::Timetable> for Timetable {
    type Error = LoadError;

    fn try_from(value: gtfs::Timetable) -> Result<Self, Self::Error> {
        let stops: HashMap<ID, Arc<Stop>> = value
            .stops
            .into_iter()
            .map(|stop| {
                (
                    stop.stop_id.to_owned(),
                    Arc::new(Stop {
                        id: stop.stop_id,
                        name: stop.stop_name,
                        coord: Coord::new(stop.stop_lat, stop.stop_lon),
                    }),
                )
            })
            .collect();

        let mut stop_times = value
            .stop_times
            .into_iter()
            .map(|stop_time| (stop_time.trip_id.to_owned(), stop_time))
            .into_group_map();

        let trips = value
            .trips
            .into_iter()
            .map(|trip| {
                let stop_visits = stop_times
                    .remove(&trip.trip_id)
                    .unwrap_or_default()
                    .into_iter()
                    .sorted_by_key(|stop_time| stop_time.stop_sequence)
                    .map(|stop_time| timed_visit(&stops, &trip.trip_id, stop_time))
                    .collect::<Result<Vec<_>, _>>()?;
                let stop_visits = fill_missing_times(&trip.trip_id, stop_visits)?;

                let headsign = trip
                    .trip_headsign
                    .or(trip.trip_short_name)
                    .unwrap_or_else(|| trip.trip_id.to_owned());

                Ok::<_, LoadError>(Trip {
                    id: trip.trip_id,
                    headsign,
                    stop_visits,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(trip_id) = stop_times.into_keys().sorted().next() {
            return Err(LoadError::UnknownTrip { trip_id });
        }

        let stops = stops.into_values().collect();
        Ok(Self::from_parts(stops, trips))
    }
}

/// A stop visit as listed, before times left out on non-timepoint stops are filled in.
#[derive(Debug)]
struct TimedVisit {
    stop: Arc<Stop>,
    arrival_time: Option<Time>,
    departure_time: Option<Time>,
}

fn timed_visit(
    stops: &HashMap<ID, Arc<Stop>>,
    trip_id: &str,
    stop_time: gtfs::StopTime,
) -> Result<TimedVisit, LoadError> {
    let stop = stops
        .get(&stop_time.stop_id)
        .ok_or_else(|| LoadError::UnknownStop {
            stop_id: stop_time.stop_id.to_owned(),
            trip_id: trip_id.to_owned(),
        })?;

    let time = |value: &str| {
        if value.trim().is_empty() {
            return Ok(None);
        }
        gtfs::parse_time(value)
            .map(Some)
            .ok_or_else(|| LoadError::MalformedTime {
                value: value.to_owned(),
                stop_id: stop_time.stop_id.to_owned(),
                trip_id: trip_id.to_owned(),
            })
    };

    Ok(TimedVisit {
        stop: Arc::clone(stop),
        arrival_time: time(&stop_time.arrival_time)?,
        departure_time: time(&stop_time.departure_time)?,
    })
}

/// A visit with only one of its times uses it for both. A visit without any time is placed
/// evenly between the closest timed visits around it; the first and last visit must be timed.
fn fill_missing_times(
    trip_id: &str,
    visits: Vec<TimedVisit>,
) -> Result<Vec<StopVisit>, LoadError> {
    let visits: Vec<TimedVisit> = visits
        .into_iter()
        .map(|visit| TimedVisit {
            arrival_time: visit.arrival_time.or(visit.departure_time),
            departure_time: visit.departure_time.or(visit.arrival_time),
            ..visit
        })
        .collect();

    let missing_time = |visit: &TimedVisit| LoadError::MissingTime {
        stop_id: visit.stop.id.to_owned(),
        trip_id: trip_id.to_owned(),
    };

    visits
        .iter()
        .enumerate()
        .map(|(index, visit)| {
            let times = (visit.arrival_time, visit.departure_time);
            let (arrival_time, departure_time) = match times {
                (Some(arrival_time), Some(departure_time)) => (arrival_time, departure_time),
                _ => {
                    let (before, before_time) = visits[..index]
                        .iter()
                        .enumerate()
                        .rev()
                        .find_map(|(i, visit)| Some((i, visit.departure_time?)))
                        .ok_or_else(|| missing_time(visit))?;
                    let (after, after_time) = visits[index + 1..]
                        .iter()
                        .enumerate()
                        .find_map(|(i, visit)| Some((index + 1 + i, visit.arrival_time?)))
                        .ok_or_else(|| missing_time(visit))?;

                    let time = before_time
                        + (after_time - before_time) * (index - before) as Time
                            / (after - before) as Time;
                    (time, time)
                }
            };

            Ok::<_, LoadError>(StopVisit {
                stop: Arc::clone(&visit.stop),
                arrival_time,
                departure_time,
            })
        })
        .collect()
}

/// Holds the timetable currently in use. A refresh swaps the whole snapshot, so a pass that
/// already took one keeps reading a consistent timetable.
#[derive(Debug, Default)]
pub struct TimetableSnapshot {
    current: RwLock<Arc<Timetable>>,
}

impl TimetableSnapshot {
    pub fn new(timetable: Timetable) -> Self {
        Self {
            current: RwLock::new(Arc::new(timetable)),
        }
    }

    pub fn load(&self) -> Arc<Timetable> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Installs `timetable` and returns the snapshot it replaced.
    pub fn replace(&self, timetable: Timetable) -> Arc<Timetable> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(
            "Replacing timetable: {} stops, {} trips",
            timetable.stops.len(),
            timetable.trips.len()
        );
        std::mem::replace(&mut *current, Arc::new(timetable))
    }
}
