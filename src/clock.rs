use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::data::{Time, SERVICE_DAY};

/// Seconds since the start of the service day `at` falls on.
///
/// Service days start twelve hours before local noon, which is midnight except on days with
/// a daylight saving transition.
pub fn service_time(at: DateTime<Tz>) -> Time {
    let timezone = at.timezone();
    let noon = at
        .date_naive()
        .and_hms_opt(12, 0, 0)
        .and_then(|noon| timezone.from_local_datetime(&noon).earliest());

    match noon {
        Some(noon) => (at - (noon - Duration::hours(12))).num_seconds(),
        None => Time::from(at.num_seconds_from_midnight()),
    }
}

pub fn now_in(timezone: Tz) -> Time {
    service_time(Utc::now().with_timezone(&timezone))
}

/// The instants at which a trip may be observed: on today's service day, then on the
/// previous one, for trips still running after midnight whether by schedule or by delay.
pub fn candidate_times(now: Time) -> [Time; 2] {
    [now, now + SERVICE_DAY]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chrono_tz::Europe::Brussels;

    use super::*;

    fn brussels(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Tz> {
        Brussels
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, min, s)
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn ordinary_day_counts_from_midnight() {
        assert_eq!(service_time(brussels(2024, 6, 12, 0, 0, 0)), 0);
        assert_eq!(service_time(brussels(2024, 6, 12, 8, 15, 30)), 29_730);
        assert_eq!(service_time(brussels(2024, 6, 12, 23, 59, 59)), 86_399);
    }

    #[test]
    fn same_instant_in_another_zone_agrees() {
        let local = brussels(2024, 6, 12, 8, 15, 30);
        let utc = local.with_timezone(&chrono_tz::UTC);

        assert_eq!(service_time(utc), 29_730 - 2 * 3600);
        assert_eq!(service_time(utc.with_timezone(&Brussels)), 29_730);
    }

    #[test]
    fn daylight_saving_day_counts_from_noon_minus_twelve_hours() {
        // Clocks jump from 02:00 to 03:00 on 31 March 2024.
        assert_eq!(service_time(brussels(2024, 3, 31, 8, 0, 0)), 8 * 3600);
        assert_eq!(service_time(brussels(2024, 3, 31, 12, 0, 0)), 12 * 3600);
    }

    #[test]
    fn today_before_previous_service_day() {
        assert_eq!(candidate_times(600), [600, 600 + SERVICE_DAY]);
    }
}
