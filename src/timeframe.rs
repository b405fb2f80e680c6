//! Timeframe resolution
//!
//! Maps the named timeframe tokens (`today`, `7days`, `30days`) to concrete
//! UTC windows, and widens windows to whole-day bounds for the cost endpoint,
//! which only understands day granularity.

use chrono::{Duration, Utc};
use tracing::debug;

use crate::models::TimeWindow;

/// A named reporting timeframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    Today,
    SevenDays,
    ThirtyDays,
}

impl Timeframe {
    /// Parse a timeframe token.
    ///
    /// Unrecognized tokens resolve to `Today` rather than erroring; the
    /// original tracker behaves this way and callers rely on it.
    pub fn parse(token: &str) -> Self {
        match token {
            "today" => Timeframe::Today,
            "7days" => Timeframe::SevenDays,
            "30days" => Timeframe::ThirtyDays,
            other => {
                debug!(token = other, "unknown timeframe token, using today");
                Timeframe::Today
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Today => "today",
            Timeframe::SevenDays => "7days",
            Timeframe::ThirtyDays => "30days",
        }
    }
}

impl TimeWindow {
    /// Resolve a timeframe against the current instant.
    pub fn resolve(timeframe: Timeframe) -> Self {
        Self::resolve_at(timeframe, Utc::now())
    }

    /// Resolve a timeframe against an explicit `now`.
    ///
    /// Every timeframe ends at `now`; the start is midnight UTC of the first
    /// calendar day in the range (today, 6 days back, or 29 days back - the
    /// ranges are inclusive of today).
    pub fn resolve_at(timeframe: Timeframe, now: chrono::DateTime<Utc>) -> Self {
        let today_start = now.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();

        let start = match timeframe {
            Timeframe::Today => today_start,
            Timeframe::SevenDays => today_start - Duration::days(6),
            Timeframe::ThirtyDays => today_start - Duration::days(29),
        };

        TimeWindow { start, end: now }
    }

    /// Widen to full UTC day boundaries for the cost endpoint.
    ///
    /// Start moves back to midnight of its day; end moves forward to midnight
    /// of the day after its day, so a partial final day is fully covered.
    pub fn widened_to_day_bounds(&self) -> Self {
        let start = self.start.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
        let end = (self.end.date_naive() + Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        TimeWindow { start, end }
    }
}
