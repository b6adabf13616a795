//! Tests for search/category filtering and highlight derivation.

use chrono::{NaiveDate, NaiveTime};
use kalends_engine::{
    first_title_match, highlighted_dates, matches_filter, selectable_categories, CategoryFilter,
    Event, Recurrence,
};

fn event(id: &str, title: &str, description: &str, category: &str) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        description: description.to_string(),
        category: category.to_string(),
        recurrence: Recurrence::None,
    }
}

fn dated(id: &str, title: &str, year: i32, month: u32, day: u32) -> Event {
    Event {
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        ..event(id, title, "", "General")
    }
}

// ---------------------------------------------------------------------------
// matches_filter
// ---------------------------------------------------------------------------

#[test]
fn filter_matches_title_substring_case_insensitively() {
    let ev = event("1", "Team Standup", "", "Work");

    assert!(matches_filter(&ev, "standup", &CategoryFilter::All));
    assert!(matches_filter(&ev, "TEAM", &CategoryFilter::All));
    assert!(!matches_filter(&ev, "retro", &CategoryFilter::All));
}

#[test]
fn filter_matches_description_too() {
    let ev = event("1", "Standup", "Daily sync with the backend team", "Work");

    assert!(matches_filter(&ev, "backend", &CategoryFilter::All));
}

#[test]
fn empty_filter_text_matches_everything() {
    let ev = event("1", "Standup", "", "Work");

    assert!(matches_filter(&ev, "", &CategoryFilter::All));
}

#[test]
fn category_filter_requires_exact_match() {
    let ev = event("1", "Standup", "", "Work");

    assert!(matches_filter(&ev, "", &CategoryFilter::Only("Work".to_string())));
    assert!(!matches_filter(&ev, "", &CategoryFilter::Only("work".to_string())));
    assert!(!matches_filter(&ev, "", &CategoryFilter::Only("Personal".to_string())));
}

#[test]
fn text_and_category_filters_combine() {
    let ev = event("1", "Standup", "", "Work");

    assert!(!matches_filter(&ev, "standup", &CategoryFilter::Only("Personal".to_string())));
    assert!(matches_filter(&ev, "standup", &CategoryFilter::Only("Work".to_string())));
}

// ---------------------------------------------------------------------------
// selectable_categories
// ---------------------------------------------------------------------------

#[test]
fn categories_are_distinct_in_first_appearance_order() {
    let events = vec![
        event("1", "a", "", "Work"),
        event("2", "b", "", "Personal"),
        event("3", "c", "", "Work"),
        event("4", "d", "", "General"),
    ];

    assert_eq!(selectable_categories(&events), ["Work", "Personal", "General"]);
}

#[test]
fn general_is_prepended_when_no_event_uses_it() {
    let events = vec![event("1", "a", "", "Work")];

    assert_eq!(selectable_categories(&events), ["General", "Work"]);
}

#[test]
fn general_is_offered_even_with_no_events() {
    assert_eq!(selectable_categories(&[]), ["General"]);
}

#[test]
fn empty_category_values_are_skipped() {
    let events = vec![event("1", "a", "", ""), event("2", "b", "", "Urgent")];

    assert_eq!(selectable_categories(&events), ["General", "Urgent"]);
}

#[test]
fn custom_categories_appear_alongside_builtins() {
    let events = vec![event("1", "a", "", "Band Practice")];

    assert_eq!(selectable_categories(&events), ["General", "Band Practice"]);
}

// ---------------------------------------------------------------------------
// highlighted_dates
// ---------------------------------------------------------------------------

#[test]
fn highlight_requires_exact_title_match_ignoring_case() {
    let events = vec![
        dated("1", "Standup", 2024, 3, 1),
        dated("2", "Standup notes", 2024, 3, 2),
    ];

    let dates = highlighted_dates(&events, "standup");
    assert_eq!(dates, [NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()]);
}

#[test]
fn highlight_collects_every_exactly_matching_event() {
    let events = vec![
        dated("1", "Standup", 2024, 3, 1),
        dated("2", "STANDUP", 2024, 4, 2),
    ];

    let dates = highlighted_dates(&events, "Standup");
    assert_eq!(
        dates,
        [
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        ]
    );
}

#[test]
fn blank_search_text_highlights_nothing() {
    let events = vec![dated("1", "Standup", 2024, 3, 1)];

    assert!(highlighted_dates(&events, "").is_empty());
    assert!(highlighted_dates(&events, "   ").is_empty());
}

// ---------------------------------------------------------------------------
// first_title_match
// ---------------------------------------------------------------------------

#[test]
fn first_match_follows_list_order_not_date_order() {
    let events = vec![
        dated("1", "Planning meeting", 2024, 6, 10),
        dated("2", "Sprint planning", 2024, 2, 1),
    ];

    let matched = first_title_match(&events, "planning").unwrap();
    assert_eq!(matched.id, "1", "the first stored match wins");
}

#[test]
fn first_match_is_substring_based() {
    let events = vec![dated("1", "Quarterly review", 2024, 3, 1)];

    assert!(first_title_match(&events, "review").is_some());
    assert!(first_title_match(&events, "REVIEW").is_some());
    assert!(first_title_match(&events, "retro").is_none());
}

#[test]
fn blank_text_matches_no_event() {
    let events = vec![dated("1", "Standup", 2024, 3, 1)];

    assert!(first_title_match(&events, "").is_none());
    assert!(first_title_match(&events, "  ").is_none());
}
