use std::collections::HashMap;

use serde::Serialize;

use crate::{
    data::{Time, Trip, ID},
    feed::DelayUpdate,
};

/// Arrival and departure delay in effect at one stop, in seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delay {
    pub arrival: Time,
    pub departure: Time,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Announced {
    pub arrival: Option<Time>,
    pub departure: Option<Time>,
}

/// Delays announced by the feed for one trip, keyed by stop.
#[derive(Debug, Default)]
pub struct DelayMap(HashMap<ID, Announced>);

impl DelayMap {
    /// Later updates for the same stop replace earlier ones.
    pub fn from_updates(updates: &[DelayUpdate]) -> Self {
        Self(
            updates
                .iter()
                .map(|update| {
                    (
                        update.stop_id.to_owned(),
                        Announced {
                            arrival: update.arrival_delay,
                            departure: update.departure_delay,
                        },
                    )
                })
                .collect(),
        )
    }

    pub fn get(&self, stop_id: &str) -> Option<&Announced> {
        self.0.get(stop_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Carries `current` past `stop_id`: announced fields overwrite, absent ones are kept.
    pub fn advance(&self, current: Delay, stop_id: &str) -> Delay {
        match self.get(stop_id) {
            Some(announced) => Delay {
                arrival: announced.arrival.unwrap_or(current.arrival),
                departure: announced.departure.unwrap_or(current.departure),
            },
            None => current,
        }
    }

    /// The delay in effect at every stop of `trip`, in route order.
    pub fn forward_fill<'a>(&'a self, trip: &'a Trip) -> impl Iterator<Item = Delay> + 'a {
        trip.stop_visits
            .iter()
            .scan(Delay::default(), move |current, stop_visit| {
                *current = self.advance(*current, &stop_visit.stop.id);
                Some(*current)
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::{Coord, Stop, StopVisit};

    fn trip(stop_ids: &[&str]) -> Trip {
        Trip {
            id: "T".to_owned(),
            headsign: "Brussel-Zuid".to_owned(),
            stop_visits: stop_ids
                .iter()
                .enumerate()
                .map(|(i, id)| StopVisit {
                    stop: Arc::new(Stop {
                        id: id.to_string(),
                        name: id.to_string(),
                        coord: Coord::new(50.0, 4.0 + i as f64),
                    }),
                    arrival_time: 1000 * i as Time,
                    departure_time: 1000 * i as Time,
                })
                .collect(),
        }
    }

    fn update(stop_id: &str, arrival: Option<Time>, departure: Option<Time>) -> DelayUpdate {
        DelayUpdate {
            stop_id: stop_id.to_owned(),
            arrival_delay: arrival,
            departure_delay: departure,
        }
    }

    fn delay(arrival: Time, departure: Time) -> Delay {
        Delay { arrival, departure }
    }

    #[test]
    fn no_updates_means_zero_delay() {
        let delays = DelayMap::from_updates(&[]);
        let trip = trip(&["A", "B", "C"]);

        assert!(delays.is_empty());
        assert!(delays.forward_fill(&trip).all(|d| d == Delay::default()));
    }

    #[test]
    fn forward_fills_until_superseded() {
        let delays = DelayMap::from_updates(&[
            update("B", Some(120), Some(180)),
            update("D", Some(60), Some(60)),
        ]);
        let trip = trip(&["A", "B", "C", "D", "E"]);

        assert_eq!(
            delays.forward_fill(&trip).collect::<Vec<_>>(),
            vec![
                delay(0, 0),
                delay(120, 180),
                delay(120, 180),
                delay(60, 60),
                delay(60, 60),
            ]
        );
    }

    #[test]
    fn absent_field_keeps_previous_value() {
        let delays = DelayMap::from_updates(&[
            update("A", Some(300), Some(300)),
            update("B", None, Some(0)),
            update("C", Some(-45), None),
        ]);
        let trip = trip(&["A", "B", "C"]);

        assert_eq!(
            delays.forward_fill(&trip).collect::<Vec<_>>(),
            vec![delay(300, 300), delay(300, 0), delay(-45, 0)]
        );
    }

    #[test]
    fn last_update_for_a_stop_wins() {
        let delays = DelayMap::from_updates(&[
            update("A", Some(60), Some(60)),
            update("A", Some(240), None),
        ]);

        assert_eq!(
            delays.get("A"),
            Some(&Announced {
                arrival: Some(240),
                departure: None,
            })
        );
    }

    #[test]
    fn forward_fill_is_monotonic() {
        let delays = DelayMap::from_updates(&[update("C", Some(90), Some(90))]);
        let trip = trip(&["A", "B", "C", "D", "E", "F"]);

        let filled: Vec<_> = delays.forward_fill(&trip).collect();

        assert!(filled[..2].iter().all(|d| *d == Delay::default()));
        assert!(filled[2..].iter().all(|d| *d == delay(90, 90)));
    }

    #[test]
    fn updates_for_foreign_stops_are_ignored() {
        let delays = DelayMap::from_updates(&[update("Z", Some(600), Some(600))]);
        let trip = trip(&["A", "B"]);

        assert!(delays.forward_fill(&trip).all(|d| d == Delay::default()));
    }
}
