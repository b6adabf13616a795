//! Search and category filtering, the derived category set, and the
//! exact-title highlight matching.

use chrono::NaiveDate;

use crate::event::{Event, DEFAULT_CATEGORY};

/// Category filter selection: everything, or a single category by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => name == category,
        }
    }
}

/// Whether `event` passes the text and category filters.
///
/// The text matches when the title or the description contains it,
/// case-insensitively; the empty string matches everything.
pub fn matches_filter(event: &Event, text: &str, category: &CategoryFilter) -> bool {
    let needle = text.to_lowercase();
    let text_match = event.title.to_lowercase().contains(&needle)
        || event.description.to_lowercase().contains(&needle);
    text_match && category.admits(&event.category)
}

/// The categories offered by the filter selector and the event form: every
/// distinct non-empty category in first-appearance order, with `"General"`
/// ensured at the front even when no event uses it.
pub fn selectable_categories(events: &[Event]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for ev in events {
        if !ev.category.is_empty() && !categories.contains(&ev.category) {
            categories.push(ev.category.clone());
        }
    }
    if !categories.iter().any(|c| c == DEFAULT_CATEGORY) {
        categories.insert(0, DEFAULT_CATEGORY.to_string());
    }
    categories
}

/// Anchor dates of events whose title equals `text` case-insensitively.
///
/// Highlighting matches anchor dates only, not projected recurrences.
/// Blank search text highlights nothing.
pub fn highlighted_dates(events: &[Event], text: &str) -> Vec<NaiveDate> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let needle = text.to_lowercase();
    events
        .iter()
        .filter(|ev| ev.title.to_lowercase() == needle)
        .map(|ev| ev.date)
        .collect()
}

/// The first event, in list order, whose title contains `text`
/// case-insensitively. Drives the month auto-jump when the search text
/// changes. Blank text matches nothing.
pub fn first_title_match<'a>(events: &'a [Event], text: &str) -> Option<&'a Event> {
    if text.trim().is_empty() {
        return None;
    }
    let needle = text.to_lowercase();
    events
        .iter()
        .find(|ev| ev.title.to_lowercase().contains(&needle))
}
