//! Prayer times endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveTime, Utc};
use recitation_core::prayer::{
    countdown, format_12h, format_countdown, hijri_label, DailySchedule, Prayer,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn time_view(prayer: Prayer, time: NaiveTime) -> PrayerTimeView {
    PrayerTimeView {
        name: prayer.as_str().to_string(),
        time: time.format("%H:%M").to_string(),
        display: format_12h(time),
    }
}

/// GET /api/prayer-times?latitude=&longitude=&time=
pub async fn prayer_times(
    State(state): State<AppState>,
    Query(query): Query<PrayerTimesQuery>,
) -> Result<Json<PrayerTimesResponse>> {
    if !(-90.0..=90.0).contains(&query.latitude) || !(-180.0..=180.0).contains(&query.longitude) {
        return Err(ApiError::BadRequest(format!(
            "Invalid coordinates: {}, {}",
            query.latitude, query.longitude
        )));
    }

    let now = Local::now().naive_local();
    let now = match query.time.as_deref() {
        Some(raw) => {
            let time = NaiveTime::parse_from_str(raw.trim(), "%H:%M")
                .map_err(|_| ApiError::BadRequest(format!("Invalid time: {}", raw)))?;
            now.date().and_time(time)
        }
        None => now,
    };

    let (day, location) = tokio::join!(
        state
            .content
            .prayer_day(query.latitude, query.longitude, Utc::now().timestamp()),
        state.content.locate(query.latitude, query.longitude),
    );
    let day = day?;

    let schedule = DailySchedule::from_timings(&day.timings)
        .map_err(|e| ApiError::Upstream(e.to_string()))?;
    let (current, next) = schedule.current_and_next(now.time());
    let next_time = schedule.time_of(next);

    Ok(Json(PrayerTimesResponse {
        location,
        hijri_date: hijri_label(&day.hijri_day, &day.hijri_month, &day.hijri_year),
        timings: schedule
            .entries()
            .iter()
            .map(|(prayer, time)| time_view(*prayer, *time))
            .collect(),
        current: time_view(current, schedule.time_of(current)),
        next: time_view(next, next_time),
        countdown: format_countdown(countdown(next_time, now)),
    }))
}
