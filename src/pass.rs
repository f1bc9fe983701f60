use crate::{
    clock,
    data::Time,
    delay::DelayMap,
    estimator::{self, PositionEstimate},
    feed::{Feed, FeedEntity},
    timetable::TimetableStore,
    translate::Translator,
};

/// Estimates the position of every trip named by a feed against one timetable snapshot.
#[derive(Debug)]
pub struct EstimationPass<'a, S: ?Sized, T: ?Sized> {
    pub store: &'a S,
    pub translator: &'a T,
    pub diagnostics: bool,
}

impl<'a, S, T> EstimationPass<'a, S, T>
where
    S: TimetableStore + ?Sized,
    T: Translator + ?Sized,
{
    pub fn new(store: &'a S, translator: &'a T) -> Self {
        Self {
            store,
            translator,
            diagnostics: false,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// One estimate at most per entity, in feed order.
    pub fn run(&self, feed: &Feed, now: Time) -> Vec<PositionEstimate> {
        let estimates: Vec<PositionEstimate> = feed
            .entities
            .iter()
            .filter_map(|entity| self.estimate(entity, now))
            .collect();

        tracing::debug!(
            "Estimated {} positions from {} feed entities",
            estimates.len(),
            feed.entities.len()
        );
        estimates
    }

    pub fn estimate(&self, entity: &FeedEntity, now: Time) -> Option<PositionEstimate> {
        let Some(trip) = self.store.lookup_trip(&entity.trip_id) else {
            tracing::debug!(
                "Skipping feed entity {:?}: no such Trip {:?}",
                entity.entity_id,
                entity.trip_id
            );
            return None;
        };

        let delays = DelayMap::from_updates(&entity.delay_updates);

        clock::candidate_times(now).into_iter().find_map(|at| {
            estimator::locate(&trip, &delays, at).map(|located| {
                PositionEstimate::new(
                    &trip,
                    &delays,
                    &located,
                    at,
                    self.translator,
                    self.diagnostics,
                )
            })
        })
    }
}
