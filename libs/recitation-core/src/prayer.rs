//! Daily prayer schedule helpers.
//!
//! Timings themselves come from an external API; this module only orders
//! them and works out which prayer is current and which is next.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::PrayerTimings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

/// Parse "HH:MM", tolerating a trailing timezone label such as "05:12 (BST)".
fn parse_time(prayer: Prayer, value: &str) -> Result<NaiveTime> {
    let clock = value.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(clock, "%H:%M").map_err(|_| CoreError::InvalidTime {
        prayer: prayer.as_str().to_string(),
        value: value.to_string(),
    })
}

/// The five prayers of one day, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    times: [(Prayer, NaiveTime); 5],
}

impl DailySchedule {
    pub fn from_timings(timings: &PrayerTimings) -> Result<Self> {
        Ok(Self {
            times: [
                (Prayer::Fajr, parse_time(Prayer::Fajr, &timings.fajr)?),
                (Prayer::Dhuhr, parse_time(Prayer::Dhuhr, &timings.dhuhr)?),
                (Prayer::Asr, parse_time(Prayer::Asr, &timings.asr)?),
                (Prayer::Maghrib, parse_time(Prayer::Maghrib, &timings.maghrib)?),
                (Prayer::Isha, parse_time(Prayer::Isha, &timings.isha)?),
            ],
        })
    }

    pub fn time_of(&self, prayer: Prayer) -> NaiveTime {
        // `times` is stored in declaration order.
        self.times[prayer as usize].1
    }

    pub fn entries(&self) -> &[(Prayer, NaiveTime)] {
        &self.times
    }

    /// Current and next prayer at `now`.
    ///
    /// Before Fajr the current prayer is the previous night's Isha; after
    /// Isha the next prayer is tomorrow's Fajr.
    pub fn current_and_next(&self, now: NaiveTime) -> (Prayer, Prayer) {
        let last = self.times.len() - 1;
        match self.times.iter().position(|(_, t)| now < *t) {
            Some(0) => (self.times[last].0, self.times[0].0),
            Some(i) => (self.times[i - 1].0, self.times[i].0),
            None => (self.times[last].0, self.times[0].0),
        }
    }
}

/// Time left until `next` o'clock, rolling over to tomorrow once it has passed.
pub fn countdown(next: NaiveTime, now: NaiveDateTime) -> Duration {
    let mut target = now.date().and_time(next);
    if target < now {
        target += Duration::days(1);
    }
    target - now
}

/// "2 Hours 1 Minute" style label.
pub fn format_countdown(remaining: Duration) -> String {
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    format!(
        "{} Hour{} {} Minute{}",
        hours,
        if hours != 1 { "s" } else { "" },
        minutes,
        if minutes != 1 { "s" } else { "" },
    )
}

/// 12-hour clock label, e.g. "05:07 AM".
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Hijri date label, e.g. "14 Ramaḍān 1447".
pub fn hijri_label(day: &str, month: &str, year: &str) -> String {
    format!("{} {} {}", day, month, year)
}
