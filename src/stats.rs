use serde::Serialize;

use crate::{data::Time, estimator::PositionEstimate};

/// Delays up to this many seconds count as minor.
pub const MINOR_DELAY_LIMIT: Time = 6 * 60;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DelayClass {
    OnTime,
    Minor,
    Major,
}

impl DelayClass {
    pub fn of(delay: Time) -> Self {
        if delay == 0 {
            Self::OnTime
        } else if delay <= MINOR_DELAY_LIMIT {
            Self::Minor
        } else {
            Self::Major
        }
    }
}

#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PassStats {
    pub on_time: usize,
    pub minor: usize,
    pub major: usize,
    pub max_delay: Time,
    pub avg_delay: f64,
}

impl PassStats {
    pub fn total(&self) -> usize {
        self.on_time + self.minor + self.major
    }
}

impl<'a> FromIterator<&'a PositionEstimate> for PassStats {
    fn from_iter<I: IntoIterator<Item = &'a PositionEstimate>>(iter: I) -> Self {
        let mut stats = Self::default();
        let mut total_delay: Time = 0;

        for estimate in iter {
            match DelayClass::of(estimate.delay) {
                DelayClass::OnTime => stats.on_time += 1,
                DelayClass::Minor => stats.minor += 1,
                DelayClass::Major => stats.major += 1,
            }
            total_delay += estimate.delay;
            stats.max_delay = stats.max_delay.max(estimate.delay);
        }

        if stats.total() > 0 {
            stats.avg_delay = total_delay as f64 / stats.total() as f64;
        }
        stats
    }
}

/// `M:SS min`, e.g. `4:05 min`.
pub fn format_delay(delay: Time) -> String {
    let sign = if delay < 0 { "-" } else { "" };
    let delay = delay.unsigned_abs();
    format!("{sign}{}:{:02} min", delay / 60, delay % 60)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn estimate(delay: Time) -> PositionEstimate {
        PositionEstimate {
            id: format!("T{delay}"),
            name: "Leuven".to_owned(),
            lat: 50.88,
            lon: 4.71,
            delay,
            next_stop_name: "Leuven".to_owned(),
            stop_index: 0,
            is_stationary: true,
            stops: vec![],
            diagnostics: None,
        }
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(DelayClass::of(0), DelayClass::OnTime);
        assert_eq!(DelayClass::of(1), DelayClass::Minor);
        assert_eq!(DelayClass::of(-120), DelayClass::Minor);
        assert_eq!(DelayClass::of(360), DelayClass::Minor);
        assert_eq!(DelayClass::of(361), DelayClass::Major);
    }

    #[test]
    fn summarises_a_pass() {
        let estimates = [estimate(0), estimate(120), estimate(600), estimate(0)];

        let stats: PassStats = estimates.iter().collect();

        assert_eq!(stats.on_time, 2);
        assert_eq!(stats.minor, 1);
        assert_eq!(stats.major, 1);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.max_delay, 600);
        assert_relative_eq!(stats.avg_delay, 180.0);
    }

    #[test]
    fn empty_pass_has_zero_average() {
        let stats: PassStats = std::iter::empty::<&PositionEstimate>().collect();

        assert_eq!(stats, PassStats::default());
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_delay(0), "0:00 min");
        assert_eq!(format_delay(245), "4:05 min");
        assert_eq!(format_delay(600), "10:00 min");
        assert_eq!(format_delay(-30), "-0:30 min");
    }
}
