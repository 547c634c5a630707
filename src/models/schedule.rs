//! Task schedule payloads and validation.
//!
//! The platform rejects malformed schedules with opaque 422s, so the
//! frequency rules are enforced locally before the request is sent:
//! `once` is pinned to a single run, `weekly` takes weekdays 0-6 and
//! `monthly` takes exactly one day of month (1-28 or the last day).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidSchedule {
    #[error("interval must be at least 1")]
    ZeroInterval,

    #[error("weekly schedules need at least one day")]
    NoWeeklyDays,

    #[error("weekday {0} is out of range (0 = Sunday through 6 = Saturday)")]
    BadWeekday(u8),

    #[error("day of month {0} is out of range (1 through 28, or last_day)")]
    BadMonthDay(u8),
}

/// Day-of-month setting for monthly schedules.
///
/// Days past 28 are not accepted by the platform; `LastDay` covers
/// month-end runs instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyDay {
    Day(u8),
    LastDay,
}

impl Serialize for MonthlyDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MonthlyDay::Day(day) => serializer.serialize_u8(*day),
            MonthlyDay::LastDay => serializer.serialize_str("last_day"),
        }
    }
}

/// Run frequency plus its frequency-specific settings.
///
/// The interval unit follows the frequency: hours for `Hourly`, days
/// for `Daily`, weeks for `Weekly` and months for `Monthly`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Once,
    Hourly { interval: u32 },
    Daily { interval: u32 },
    Weekly { interval: u32, days: Vec<u8> },
    Monthly { interval: u32, day: MonthlyDay },
}

impl Frequency {
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Once => "once",
            Frequency::Hourly { .. } => "hourly",
            Frequency::Daily { .. } => "daily",
            Frequency::Weekly { .. } => "weekly",
            Frequency::Monthly { .. } => "monthly",
        }
    }

    fn interval(&self) -> u32 {
        match self {
            Frequency::Once => 1,
            Frequency::Hourly { interval }
            | Frequency::Daily { interval }
            | Frequency::Weekly { interval, .. }
            | Frequency::Monthly { interval, .. } => *interval,
        }
    }

    /// The `settings` attribute: days for weekly/monthly, empty otherwise.
    fn settings(&self) -> Value {
        match self {
            Frequency::Weekly { days, .. } => json!({ "days": days }),
            Frequency::Monthly { day, .. } => json!({ "days": [day] }),
            _ => json!({}),
        }
    }
}

/// A task schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub frequency: Frequency,
    /// First execution time.
    pub starts_at: DateTime<Utc>,
    /// tz database name the start time is interpreted in,
    /// e.g. `America/Sao_Paulo`.
    pub timezone: String,
}

impl Schedule {
    pub fn new(frequency: Frequency, starts_at: DateTime<Utc>, timezone: impl Into<String>) -> Self {
        Self {
            frequency,
            starts_at,
            timezone: timezone.into(),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidSchedule> {
        match &self.frequency {
            Frequency::Once => Ok(()),
            Frequency::Hourly { interval } | Frequency::Daily { interval } => {
                if *interval == 0 {
                    return Err(InvalidSchedule::ZeroInterval);
                }
                Ok(())
            }
            Frequency::Weekly { interval, days } => {
                if *interval == 0 {
                    return Err(InvalidSchedule::ZeroInterval);
                }
                if days.is_empty() {
                    return Err(InvalidSchedule::NoWeeklyDays);
                }
                for day in days {
                    if *day > 6 {
                        return Err(InvalidSchedule::BadWeekday(*day));
                    }
                }
                Ok(())
            }
            Frequency::Monthly { interval, day } => {
                if *interval == 0 {
                    return Err(InvalidSchedule::ZeroInterval);
                }
                if let MonthlyDay::Day(day) = day {
                    if !(1..=28).contains(day) {
                        return Err(InvalidSchedule::BadMonthDay(*day));
                    }
                }
                Ok(())
            }
        }
    }

    pub(crate) fn to_document(&self) -> Value {
        json!({
            "data": {
                "type": "schedule",
                "attributes": {
                    "frequency": self.frequency.name(),
                    "interval": self.frequency.interval(),
                    "starts_at": self.starts_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                    "starts_at_timezone": self.timezone,
                    "settings": self.frequency.settings()
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 17, 22, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_accepts_well_formed_schedules() {
        let cases = [
            Frequency::Once,
            Frequency::Hourly { interval: 4 },
            Frequency::Daily { interval: 1 },
            Frequency::Weekly { interval: 2, days: vec![0, 3, 6] },
            Frequency::Monthly { interval: 1, day: MonthlyDay::Day(28) },
            Frequency::Monthly { interval: 3, day: MonthlyDay::LastDay },
        ];
        for frequency in cases {
            let schedule = Schedule::new(frequency, start(), "America/Sao_Paulo");
            assert_eq!(schedule.validate(), Ok(()));
        }
    }

    #[test]
    fn test_validate_rejects_bad_schedules() {
        let schedule = Schedule::new(Frequency::Daily { interval: 0 }, start(), "UTC");
        assert_eq!(schedule.validate(), Err(InvalidSchedule::ZeroInterval));

        let schedule = Schedule::new(
            Frequency::Weekly { interval: 1, days: vec![] },
            start(),
            "UTC",
        );
        assert_eq!(schedule.validate(), Err(InvalidSchedule::NoWeeklyDays));

        let schedule = Schedule::new(
            Frequency::Weekly { interval: 1, days: vec![2, 7] },
            start(),
            "UTC",
        );
        assert_eq!(schedule.validate(), Err(InvalidSchedule::BadWeekday(7)));

        let schedule = Schedule::new(
            Frequency::Monthly { interval: 1, day: MonthlyDay::Day(31) },
            start(),
            "UTC",
        );
        assert_eq!(schedule.validate(), Err(InvalidSchedule::BadMonthDay(31)));

        let schedule = Schedule::new(
            Frequency::Monthly { interval: 1, day: MonthlyDay::Day(0) },
            start(),
            "UTC",
        );
        assert_eq!(schedule.validate(), Err(InvalidSchedule::BadMonthDay(0)));
    }

    #[test]
    fn test_document_shape_weekly() {
        let schedule = Schedule::new(
            Frequency::Weekly { interval: 2, days: vec![1, 3] },
            start(),
            "America/Sao_Paulo",
        );
        let doc = schedule.to_document();
        let attributes = &doc["data"]["attributes"];

        assert_eq!(doc["data"]["type"], "schedule");
        assert_eq!(attributes["frequency"], "weekly");
        assert_eq!(attributes["interval"], 2);
        assert_eq!(attributes["starts_at"], "2024-02-17T22:00:00.000Z");
        assert_eq!(attributes["starts_at_timezone"], "America/Sao_Paulo");
        assert_eq!(attributes["settings"]["days"], json!([1, 3]));
    }

    #[test]
    fn test_document_settings_empty_for_daily() {
        let schedule = Schedule::new(Frequency::Daily { interval: 1 }, start(), "UTC");
        let doc = schedule.to_document();
        assert_eq!(doc["data"]["attributes"]["settings"], json!({}));
    }

    #[test]
    fn test_document_monthly_last_day() {
        let schedule = Schedule::new(
            Frequency::Monthly { interval: 1, day: MonthlyDay::LastDay },
            start(),
            "UTC",
        );
        let doc = schedule.to_document();
        assert_eq!(
            doc["data"]["attributes"]["settings"]["days"],
            json!(["last_day"])
        );
    }
}
