//! Calendar grid layout.
//!
//! Days are laid out as side-by-side columns, hours as rows from the earliest
//! start to the latest end across the shown events. Each card is positioned
//! inside its day column by start time (top offset) and duration (height).
//! Events running at the same time are not separated and overlap on screen.

use crate::events::model::Event;
use crate::filter::{filter_matching, TypeFilter};
use crate::routes::Route;
use crate::session::{Session, SessionStorage};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

/// Height in pixels of one hour row
pub const HOUR_HEIGHT: f64 = 80.0;

const MIN_DURATION_HOURS: f64 = 0.5;
const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSpan {
    pub min_hour: u32,
    /// Exclusive
    pub max_hour: u32,
}

impl HourSpan {
    pub const FULL_DAY: HourSpan = HourSpan {
        min_hour: 0,
        max_hour: HOURS_PER_DAY,
    };

    pub fn total_hours(&self) -> u32 {
        self.max_hour.saturating_sub(self.min_hour)
    }

    /// Row labels like "12am", "9am", "12pm", "5pm"
    pub fn labels(&self) -> Vec<String> {
        (self.min_hour..self.max_hour).map(hour_label).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub top: f64,
    pub height: f64,
    pub duration_hours: f64,
}

/// Groups events by the calendar date of their start time in `tz`.
/// Days are in ascending order, events keep their input order.
pub fn bucket_by_day<Tz: TimeZone>(events: &[Event], tz: &Tz) -> BTreeMap<NaiveDate, Vec<Event>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();

    for event in events {
        buckets
            .entry(event.start_time.with_timezone(tz).date_naive())
            .or_default()
            .push(event.clone());
    }

    buckets
}

pub fn compute_hour_span<Tz: TimeZone>(events: &[Event], tz: &Tz) -> HourSpan {
    let min_hour = events.iter().map(|e| hour_of(&e.start_time, tz)).min();
    let max_hour = events.iter().map(|e| hour_of(&e.end_time, tz)).max();

    match (min_hour, max_hour) {
        (Some(min_hour), Some(max_hour)) => HourSpan {
            min_hour,
            max_hour: (max_hour + 1).min(HOURS_PER_DAY),
        },
        _ => HourSpan::FULL_DAY,
    }
}

/// Positions an event inside a day column starting at `day_min_hour`.
/// Short, empty or inverted intervals are drawn half an hour tall.
pub fn layout<Tz: TimeZone>(
    event: &Event,
    day_min_hour: u32,
    pixels_per_hour: f64,
    tz: &Tz,
) -> CardLayout {
    let start = offset_hours(&event.start_time, day_min_hour, tz);
    let end = offset_hours(&event.end_time, day_min_hour, tz);
    let duration_hours = (end - start).max(MIN_DURATION_HOURS);

    CardLayout {
        top: start * pixels_per_hour,
        height: duration_hours * pixels_per_hour,
        duration_hours,
    }
}

fn hour_of<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> u32 {
    instant.with_timezone(tz).hour()
}

fn offset_hours<Tz: TimeZone>(instant: &DateTime<Utc>, min_hour: u32, tz: &Tz) -> f64 {
    let local = instant.with_timezone(tz);

    (local.hour() as f64 - min_hour as f64) + local.minute() as f64 / 60.0
}

fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12am".to_string(),
        1..=11 => format!("{}am", hour),
        12 => "12pm".to_string(),
        _ => format!("{}pm", hour - 12),
    }
}

/// "Tue 1/12"
pub fn day_header(date: NaiveDate) -> String {
    date.format("%a %-m/%-d").to_string()
}

/// "Jan 12 – 13, 2021", or "Jan 31 – Feb 1, 2021" across months
pub fn date_range_label(days: &[NaiveDate]) -> String {
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return String::new();
    };

    if first.month() == last.month() {
        format!(
            "{} – {}, {}",
            first.format("%b %-d"),
            last.day(),
            first.year()
        )
    } else {
        format!(
            "{} – {}, {}",
            first.format("%b %-d"),
            last.format("%b %-d"),
            first.year()
        )
    }
}

/// "4:00 AM – 5:30 AM"
pub fn time_range_label<Tz>(event: &Event, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} – {}",
        event.start_time.with_timezone(tz).format("%-I:%M %p"),
        event.end_time.with_timezone(tz).format("%-I:%M %p")
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleCard {
    pub event: Event,
    pub layout: CardLayout,
    pub time_label: String,
    pub color: &'static str,
    pub border_color: &'static str,
    /// Private event shown blurred to an anonymous session
    pub locked: bool,
    pub link: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub header: String,
    pub cards: Vec<ScheduleCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleView {
    pub hour_span: HourSpan,
    pub hour_labels: Vec<String>,
    pub column_height: f64,
    pub date_range_label: String,
    pub days: Vec<DayColumn>,
}

impl ScheduleView {
    /// Builds the grid for the events matching `query` and `type_filter`.
    /// Private events stay in the grid but are locked for anonymous sessions.
    pub fn build<S, Tz>(
        events: &[Event],
        session: &Session<S>,
        query: &str,
        type_filter: &TypeFilter,
        pixels_per_hour: f64,
        tz: &Tz,
    ) -> Self
    where
        S: SessionStorage,
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let matching = filter_matching(events, query, type_filter);
        let hour_span = compute_hour_span(&matching, tz);
        let buckets = bucket_by_day(&matching, tz);

        debug!(
            "Schedule has {} events over {} days, hours {}..{}",
            matching.len(),
            buckets.len(),
            hour_span.min_hour,
            hour_span.max_hour
        );

        let days: Vec<DayColumn> = buckets
            .into_iter()
            .map(|(date, day_events)| DayColumn {
                date,
                header: day_header(date),
                cards: day_events
                    .into_iter()
                    .map(|event| {
                        let locked = !session.can_view(&event);

                        ScheduleCard {
                            layout: layout(&event, hour_span.min_hour, pixels_per_hour, tz),
                            time_label: time_range_label(&event, tz),
                            color: event.event_type.card_color(),
                            border_color: event.event_type.border_color(),
                            locked,
                            link: if locked {
                                Route::Login
                            } else {
                                Route::Event(event.id)
                            },
                            event,
                        }
                    })
                    .collect(),
            })
            .collect();

        let dates: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();

        Self {
            hour_span,
            hour_labels: hour_span.labels(),
            column_height: hour_span.total_hours() as f64 * pixels_per_hour,
            date_range_label: date_range_label(&dates),
            days,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Day for the single-day list mode; out of range indexes clamp to the last day
    pub fn day(&self, index: usize) -> Option<&DayColumn> {
        self.days.get(index.min(self.days.len().saturating_sub(1)))
    }
}
