//! Position of a single trip at a given instant.
//!
//! The trip is walked leg by leg in route order. A leg ends at one stop visit and starts at
//! the (delayed) departure from the visit before it; the first leg starts and ends at the
//! first stop. The first leg the vehicle is found on, either moving towards its stop or
//! standing at it, decides the estimate.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    data::{Coord, Stop, StopVisit, Time, Trip, ID},
    delay::{Delay, DelayMap},
    translate::Translator,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TripState {
    InTransit { coord: Coord, fraction: f64 },
    Dwelling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Located<'a> {
    pub stop_index: usize,
    pub stop_visit: &'a StopVisit,
    pub delay: Delay,
    pub effective_arrival: Time,
    pub effective_departure: Time,
    pub state: TripState,
}

impl Located<'_> {
    pub fn coord(&self) -> Coord {
        match self.state {
            TripState::InTransit { coord, .. } => coord,
            TripState::Dwelling => self.stop_visit.stop.coord,
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.state == TripState::Dwelling
    }

    /// Delay towards the stop while moving, delay leaving it while standing there.
    pub fn delay_seconds(&self) -> Time {
        match self.state {
            TripState::InTransit { .. } => self.delay.arrival,
            TripState::Dwelling => self.delay.departure,
        }
    }
}

#[derive(Debug)]
struct Leg<'a> {
    stop_index: usize,
    origin: &'a Arc<Stop>,
    origin_departure: Time,
    stop_visit: &'a StopVisit,
    delay: Delay,
    arrival: Time,
    departure: Time,
}

impl<'a> Leg<'a> {
    fn locate(&self, now: Time) -> Option<Located<'a>> {
        let state = if self.origin_departure <= now && now < self.arrival {
            let fraction = fraction(self.origin_departure, self.arrival, now);
            TripState::InTransit {
                coord: self.origin.coord.lerp(self.stop_visit.stop.coord, fraction),
                fraction,
            }
        } else if self.arrival <= now && now <= self.departure {
            TripState::Dwelling
        } else {
            return None;
        };

        Some(Located {
            stop_index: self.stop_index,
            stop_visit: self.stop_visit,
            delay: self.delay,
            effective_arrival: self.arrival,
            effective_departure: self.departure,
            state,
        })
    }
}

fn legs<'a>(trip: &'a Trip, delays: &'a DelayMap) -> impl Iterator<Item = Leg<'a>> + 'a {
    trip.stop_visits
        .iter()
        .zip(delays.forward_fill(trip))
        .enumerate()
        .scan(
            None::<(Time, &'a Arc<Stop>)>,
            |previous, (stop_index, (stop_visit, delay))| {
                let arrival = stop_visit.arrival_time + delay.arrival;
                let departure = stop_visit.departure_time + delay.departure;
                let (origin_departure, origin) = previous
                    .replace((departure, &stop_visit.stop))
                    .unwrap_or((arrival, &stop_visit.stop));

                Some(Leg {
                    stop_index,
                    origin,
                    origin_departure,
                    stop_visit,
                    delay,
                    arrival,
                    departure,
                })
            },
        )
}

/// Share of the leg `[start, end]` covered at `now`.
///
/// An empty (or inverted) leg counts as completed, an instant before the leg as not started.
pub fn fraction(start: Time, end: Time, now: Time) -> f64 {
    let total_span = end - start;
    if total_span <= 0 {
        1.0
    } else if now < start {
        0.0
    } else {
        let remaining = end - now;
        1.0 - remaining as f64 / total_span as f64
    }
}

/// Where `trip` is at `now`, or `None` when it is outside its service window.
pub fn locate<'a>(trip: &'a Trip, delays: &'a DelayMap, now: Time) -> Option<Located<'a>> {
    legs(trip, delays).find_map(|leg| leg.locate(now))
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub now: Time,
    pub scheduled_arrival: Time,
    pub scheduled_departure: Time,
    pub effective_arrival: Time,
    pub effective_departure: Time,
    pub delay: Delay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction: Option<f64>,
}

/// One stop of the trip with the delays in effect there.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StopEstimate {
    pub name: String,
    pub arrival_delay: Time,
    pub departure_delay: Time,
    pub arrival_time: Time,
    pub departure_time: Time,
    pub lat: f64,
    pub lon: f64,
}

/// Every stop of `trip` in route order, delays forward-filled.
pub fn stop_estimates<T: Translator + ?Sized>(
    trip: &Trip,
    delays: &DelayMap,
    translator: &T,
) -> Vec<StopEstimate> {
    legs(trip, delays)
        .map(|leg| StopEstimate {
            name: translator.translate(&leg.stop_visit.stop.name),
            arrival_delay: leg.delay.arrival,
            departure_delay: leg.delay.departure,
            arrival_time: leg.arrival,
            departure_time: leg.departure,
            lat: leg.stop_visit.stop.coord.lat,
            lon: leg.stop_visit.stop.coord.lon,
        })
        .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionEstimate {
    pub id: ID,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub delay: Time,
    pub next_stop_name: String,
    pub stop_index: usize,
    pub is_stationary: bool,
    /// `stop_index` points into this list.
    pub stops: Vec<StopEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

impl PositionEstimate {
    pub fn new<T: Translator + ?Sized>(
        trip: &Trip,
        delays: &DelayMap,
        located: &Located,
        now: Time,
        translator: &T,
        diagnostics: bool,
    ) -> Self {
        let coord = located.coord();

        Self {
            id: trip.id.to_owned(),
            name: translator.translate(&trip.headsign),
            lat: coord.lat,
            lon: coord.lon,
            delay: located.delay_seconds(),
            next_stop_name: translator.translate(&located.stop_visit.stop.name),
            stop_index: located.stop_index,
            is_stationary: located.is_stationary(),
            stops: stop_estimates(trip, delays, translator),
            diagnostics: diagnostics.then(|| Diagnostics {
                now,
                scheduled_arrival: located.stop_visit.arrival_time,
                scheduled_departure: located.stop_visit.departure_time,
                effective_arrival: located.effective_arrival,
                effective_departure: located.effective_departure,
                delay: located.delay,
                fraction: match located.state {
                    TripState::InTransit { fraction, .. } => Some(fraction),
                    TripState::Dwelling => None,
                },
            }),
        }
    }
}
