//! Slot conflict detection -- decides whether a (date, time) slot is taken.
//!
//! A candidate slot conflicts when any event claims the exact same date and
//! time, either literally or through one of its recurring occurrences.

use chrono::{NaiveDate, NaiveTime};

use crate::event::{Event, Recurrence};
use crate::occurrence::occurs_on;

/// Whether any event already occupies the `(date, time)` slot.
///
/// `exclude_id` skips one event, so editing or moving an event never
/// conflicts with itself. A recurring event claims the slot at its own time
/// on its anchor date and on every qualifying later date.
///
/// Advisory validation only: callers check before writing, and there is
/// exactly one mutator at a time, so no stronger guarantee is needed.
pub fn has_conflict(
    events: &[Event],
    date: NaiveDate,
    time: NaiveTime,
    exclude_id: Option<&str>,
) -> bool {
    events.iter().any(|ev| {
        if exclude_id.is_some_and(|id| ev.id == id) {
            return false;
        }
        if ev.date == date && ev.time == time {
            return true;
        }
        if ev.time != time || ev.recurrence == Recurrence::None {
            return false;
        }
        occurs_on(ev, date)
    })
}
