use std::fmt;

use chrono::{Duration, NaiveDateTime};

/// Text shown when an event has no end time.
pub const UNDETERMINED_DURATION: &str = "Durasi tidak ditentukan";
/// Text shown when the gap rounds down to less than a minute.
pub const ZERO_DURATION: &str = "0 menit";

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Length of an event's time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDuration {
    Undetermined,
    Span(Duration),
}

/// Whole days, hours and minutes of a span; seconds are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl EventDuration {
    /// Negative spans cannot be written (end must follow start), but a
    /// clock-skewed row is clamped to zero rather than rendered negative.
    pub fn between(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        match end {
            Some(end) => {
                EventDuration::Span((end - start).max(Duration::zero()))
            }
            None => EventDuration::Undetermined,
        }
    }

    pub fn is_determined(&self) -> bool {
        matches!(self, EventDuration::Span(_))
    }

    pub fn parts(&self) -> Option<DurationParts> {
        match self {
            EventDuration::Undetermined => None,
            EventDuration::Span(span) => {
                let total_minutes = span.num_minutes();
                Some(DurationParts {
                    days: total_minutes / MINUTES_PER_DAY,
                    hours: (total_minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR,
                    minutes: total_minutes % MINUTES_PER_HOUR,
                })
            }
        }
    }

    /// Whole hours between start and end, 0 when there is no end.
    pub fn hours(&self) -> i64 {
        match self {
            EventDuration::Undetermined => 0,
            EventDuration::Span(span) => span.num_hours(),
        }
    }

    pub fn text(&self) -> String { self.to_string() }
}

impl fmt::Display for EventDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(parts) = self.parts()
        else {
            return f.write_str(UNDETERMINED_DURATION);
        };

        let components = [
            (parts.days, "hari"),
            (parts.hours, "jam"),
            (parts.minutes, "menit"),
        ];
        let rendered: Vec<String> = components
            .iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| format!("{value} {unit}"))
            .collect();

        if rendered.is_empty() {
            f.write_str(ZERO_DURATION)
        }
        else {
            f.write_str(&rendered.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_hours_and_minutes() {
        let end = start() + Duration::hours(3) + Duration::minutes(30);
        let duration = EventDuration::between(start(), Some(end));

        assert_eq!(duration.text(), "3 jam 30 menit");
        assert_eq!(duration.hours(), 3);
    }

    #[test]
    fn test_days_are_split_out() {
        let end = start() + Duration::days(1) + Duration::hours(2);
        let duration = EventDuration::between(start(), Some(end));

        assert_eq!(duration.text(), "1 hari 2 jam");
        assert_eq!(duration.hours(), 26);
    }

    #[test]
    fn test_long_spans_count_total_days() {
        let end = start() + Duration::days(40) + Duration::minutes(5);
        let duration = EventDuration::between(start(), Some(end));

        assert_eq!(duration.text(), "40 hari 5 menit");
        assert_eq!(duration.hours(), 960);
    }

    #[test]
    fn test_exact_hours_omit_zero_minutes() {
        let end = start() + Duration::hours(2);
        assert_eq!(EventDuration::between(start(), Some(end)).text(), "2 jam");
    }

    #[test]
    fn test_sub_minute_gap_is_zero_minutes() {
        let end = start() + Duration::seconds(59);
        let duration = EventDuration::between(start(), Some(end));

        assert_eq!(duration.text(), ZERO_DURATION);
        assert_eq!(duration.hours(), 0);
        assert!(duration.is_determined());
    }

    #[test]
    fn test_zero_length_gap_is_zero_minutes() {
        let duration = EventDuration::between(start(), Some(start()));
        assert_eq!(duration.text(), ZERO_DURATION);
    }

    #[test]
    fn test_hours_are_floored() {
        let end = start() + Duration::hours(4) + Duration::minutes(59);
        assert_eq!(EventDuration::between(start(), Some(end)).hours(), 4);
    }

    #[test]
    fn test_missing_end_is_undetermined() {
        let duration = EventDuration::between(start(), None);

        assert_eq!(duration.text(), UNDETERMINED_DURATION);
        assert_eq!(duration.hours(), 0);
        assert_eq!(duration.parts(), None);
        assert!(!duration.is_determined());
    }

    #[test]
    fn test_negative_gap_is_clamped() {
        let end = start() - Duration::hours(1);
        let duration = EventDuration::between(start(), Some(end));

        assert_eq!(duration.text(), ZERO_DURATION);
        assert_eq!(duration.hours(), 0);
    }
}
