//! # kalends-engine
//!
//! Recurrence-aware occurrence projection and conflict detection for a
//! month-calendar view.
//!
//! The engine is pure and stateless: every function takes the event list and
//! the dates in question as explicit arguments, performs no I/O, and never
//! fails on well-formed events. Persistence and UI state live in
//! `kalends-app`.
//!
//! ## Modules
//!
//! - [`event`] — the `Event` record, recurrence rules, category colors
//! - [`occurrence`] — which events appear on which dates
//! - [`conflict`] — whether a (date, time) slot is already taken
//! - [`grid`] — the full-week date window rendered for a month
//! - [`filter`] — search/category filtering and highlight derivation

pub mod conflict;
pub mod event;
pub mod filter;
pub mod grid;
pub mod occurrence;

pub use conflict::has_conflict;
pub use event::{category_color, Event, Recurrence, DEFAULT_CATEGORY, FALLBACK_COLOR};
pub use filter::{
    first_title_match, highlighted_dates, matches_filter, selectable_categories, CategoryFilter,
};
pub use grid::{MonthGrid, YearMonth};
pub use occurrence::{occurs_on, project_range, DaySchedule};
