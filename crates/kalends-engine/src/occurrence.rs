//! Occurrence projection -- decides which events appear on which dates.
//!
//! Recurrence is evaluated independently per (event, date) pair rather than
//! by expanding a bounded instance list: the visible window is at most a
//! six-week grid, so the predicate form needs no recurrence terminator.

use chrono::{Datelike, NaiveDate};

use crate::event::{Event, Recurrence};

/// The events occurring on a single date, in original list order.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a Event>,
}

/// Whether `event` occurs on `target`, per its recurrence rule.
///
/// - `none`: only on the anchor date itself.
/// - `daily`: every date on or after the anchor.
/// - `weekly`: the anchor's weekday, on or after the anchor.
/// - `monthly`: the anchor's day-of-month, on or after the anchor. Anchors
///   on day 29-31 never match in months that are too short; no clamping.
pub fn occurs_on(event: &Event, target: NaiveDate) -> bool {
    match event.recurrence {
        Recurrence::None => target == event.date,
        Recurrence::Daily => target >= event.date,
        Recurrence::Weekly => target >= event.date && target.weekday() == event.date.weekday(),
        Recurrence::Monthly => target >= event.date && target.day() == event.date.day(),
    }
}

/// Project `events` onto every date in the inclusive `start..=end` range.
///
/// Each [`DaySchedule`] holds the events occurring on that date, preserving
/// their original relative order. The projection is recomputed fresh on
/// every call; the event set is small and mutates rarely relative to
/// renders, so nothing is cached.
pub fn project_range<'a>(
    events: &'a [Event],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DaySchedule<'a>> {
    let mut days = Vec::new();
    let mut date = start;
    while date <= end {
        days.push(DaySchedule {
            date,
            events: events.iter().filter(|ev| occurs_on(ev, date)).collect(),
        });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    days
}
