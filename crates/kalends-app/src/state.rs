//! Calendar state and mutation handlers.
//!
//! Two explicit rules replace any reactive wiring: after any mutation to the
//! event list the full list is persisted, and after any change to the search
//! text the visible month jumps to the first matching event's month.

use chrono::{NaiveDate, NaiveTime};
use tracing::{error, info};

use kalends_engine::{
    filter, has_conflict, occurs_on, CategoryFilter, Event, MonthGrid, Recurrence, YearMonth,
    DEFAULT_CATEGORY,
};

use crate::error::SaveError;
use crate::ids::IdGenerator;
use crate::store::EventStore;

/// Form contents for creating or editing an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub description: String,
    pub category: String,
    pub recurrence: Recurrence,
}

impl EventDraft {
    /// A blank form prefilled for `date`: noon, the default category, no
    /// recurrence.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date: Some(date),
            time: NaiveTime::from_hms_opt(12, 0, 0),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            recurrence: Recurrence::None,
        }
    }

    /// A form prefilled with an existing event's fields, for editing.
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: Some(event.date),
            time: Some(event.time),
            description: event.description.clone(),
            category: event.category.clone(),
            recurrence: event.recurrence,
        }
    }

    /// The required fields, or which one is missing.
    fn validated(&self) -> Result<(NaiveDate, NaiveTime), SaveError> {
        if self.title.trim().is_empty() {
            return Err(SaveError::MissingField("title"));
        }
        let date = self.date.ok_or(SaveError::MissingField("date"))?;
        let time = self.time.ok_or(SaveError::MissingField("time"))?;
        Ok((date, time))
    }
}

/// One rendered grid cell: the date, whether it belongs to the displayed
/// month, whether the search highlights it, and the visible events.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub highlighted: bool,
    pub events: Vec<&'a Event>,
}

/// All mutable calendar state, owned in one place. The engine stays pure;
/// every handler here re-derives what it needs from the event list.
pub struct CalendarState<S, I> {
    store: S,
    ids: I,
    events: Vec<Event>,
    visible_month: YearMonth,
    selected_date: Option<NaiveDate>,
    filter_text: String,
    filter_category: CategoryFilter,
    drag_source: Option<String>,
}

impl<S: EventStore, I: IdGenerator> CalendarState<S, I> {
    /// Load the stored events (missing or corrupt data loads as none) and
    /// open on the month containing `today`.
    pub fn open(store: S, ids: I, today: NaiveDate) -> Self {
        let events = store.load();
        info!("loaded {} events", events.len());
        Self {
            store,
            ids,
            events,
            visible_month: YearMonth::from_date(today),
            selected_date: None,
            filter_text: String::new(),
            filter_category: CategoryFilter::All,
            drag_source: None,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The underlying store, e.g. to inspect the persisted blob.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn visible_month(&self) -> YearMonth {
        self.visible_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn filter_category(&self) -> &CategoryFilter {
        &self.filter_category
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|ev| ev.id == id)
    }

    pub fn show_month(&mut self, month: YearMonth) {
        self.visible_month = month;
    }

    pub fn next_month(&mut self) {
        self.visible_month = self.visible_month.next();
    }

    pub fn prev_month(&mut self) {
        self.visible_month = self.visible_month.prev();
    }

    /// Select a day and produce the prefilled creation form for it.
    pub fn select_day(&mut self, date: NaiveDate) -> EventDraft {
        self.selected_date = Some(date);
        EventDraft::for_date(date)
    }

    /// Create a new event from `draft`. The write is rejected when a
    /// required field is blank or the slot is already taken; nothing
    /// changes on rejection.
    pub fn create_event(&mut self, draft: EventDraft) -> Result<String, SaveError> {
        let (date, time) = draft.validated()?;
        if has_conflict(&self.events, date, time, None) {
            return Err(SaveError::Conflict { date, time });
        }
        let id = self.ids.next_id();
        self.events.push(Event {
            id: id.clone(),
            title: draft.title,
            date,
            time,
            description: draft.description,
            category: non_empty_category(draft.category),
            recurrence: draft.recurrence,
        });
        info!("created event {}", id);
        self.persist();
        Ok(id)
    }

    /// Apply `draft` to the stored event with `id`, in place: same id, same
    /// list position. The conflict check excludes the event itself, so an
    /// unmoved slot never rejects its own edit.
    pub fn update_event(&mut self, id: &str, draft: EventDraft) -> Result<(), SaveError> {
        let (date, time) = draft.validated()?;
        let pos = self
            .events
            .iter()
            .position(|ev| ev.id == id)
            .ok_or_else(|| SaveError::UnknownEvent(id.to_string()))?;
        if has_conflict(&self.events, date, time, Some(id)) {
            return Err(SaveError::Conflict { date, time });
        }
        let ev = &mut self.events[pos];
        ev.title = draft.title;
        ev.date = date;
        ev.time = time;
        ev.description = draft.description;
        ev.category = non_empty_category(draft.category);
        ev.recurrence = draft.recurrence;
        info!("updated event {}", id);
        self.persist();
        Ok(())
    }

    /// Remove the event with `id`, leaving every other event untouched.
    /// Returns whether anything was removed. Confirmation is the caller's
    /// concern; the removal itself is unconditional.
    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|ev| ev.id != id);
        let removed = self.events.len() < before;
        if removed {
            info!("deleted event {}", id);
            self.persist();
        }
        removed
    }

    /// Move the event with `id` to `new_date`, keeping its time. On
    /// conflict the event stays at its original date.
    pub fn move_event(&mut self, id: &str, new_date: NaiveDate) -> Result<(), SaveError> {
        let pos = self
            .events
            .iter()
            .position(|ev| ev.id == id)
            .ok_or_else(|| SaveError::UnknownEvent(id.to_string()))?;
        let time = self.events[pos].time;
        if has_conflict(&self.events, new_date, time, Some(id)) {
            return Err(SaveError::Conflict {
                date: new_date,
                time,
            });
        }
        self.events[pos].date = new_date;
        info!("moved event {} to {}", id, new_date);
        self.persist();
        Ok(())
    }

    /// Record the event a drag gesture picked up.
    pub fn begin_drag(&mut self, id: &str) {
        self.drag_source = Some(id.to_string());
    }

    pub fn cancel_drag(&mut self) {
        self.drag_source = None;
    }

    /// Complete a drag onto `target_date`: the dragged event moves there,
    /// keeping its time. Returns the moved event's id, or `None` when no
    /// drag is active or the dragged event no longer exists. On conflict
    /// the drag source is kept, so the gesture can retry on another cell.
    pub fn drop_on(&mut self, target_date: NaiveDate) -> Result<Option<String>, SaveError> {
        let Some(id) = self.drag_source.clone() else {
            return Ok(None);
        };
        if self.find_event(&id).is_none() {
            return Ok(None);
        }
        self.move_event(&id, target_date)?;
        self.drag_source = None;
        Ok(Some(id))
    }

    /// Update the search text. When the trimmed text is non-empty and some
    /// event title contains it, the visible month jumps to that event's
    /// anchor month.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        if let Some(matched) = filter::first_title_match(&self.events, &self.filter_text) {
            self.visible_month = YearMonth::from_date(matched.date);
        }
    }

    pub fn set_filter_category(&mut self, category: CategoryFilter) {
        self.filter_category = category;
    }

    /// The events passing the current text and category filters, in stored
    /// order.
    pub fn filtered_events(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|ev| filter::matches_filter(ev, &self.filter_text, &self.filter_category))
            .collect()
    }

    /// The category set offered by the filter selector and the event form.
    pub fn categories(&self) -> Vec<String> {
        filter::selectable_categories(&self.events)
    }

    /// The visible month's grid cells: every date of the full-week window,
    /// flagged for month membership and search highlight, carrying the
    /// filtered events occurring on it.
    pub fn month_cells(&self) -> Vec<DayCell<'_>> {
        let grid = MonthGrid::for_month(self.visible_month);
        let highlighted = filter::highlighted_dates(&self.events, &self.filter_text);
        let visible = self.filtered_events();
        grid.days()
            .map(|date| DayCell {
                date,
                in_month: self.visible_month.contains(date),
                highlighted: highlighted.contains(&date),
                events: visible
                    .iter()
                    .copied()
                    .filter(|ev| occurs_on(ev, date))
                    .collect(),
            })
            .collect()
    }

    fn persist(&self) {
        // Fire-and-forget: a failed save must not roll back the mutation.
        if let Err(err) = self.store.save(&self.events) {
            error!("failed to persist events: {}", err);
        }
    }
}

fn non_empty_category(category: String) -> String {
    if category.trim().is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        category
    }
}
