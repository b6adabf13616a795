//! Event records, recurrence rules, and category display colors.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The category assigned to events that don't carry one. The category
/// selector always offers it, even when no stored event uses it.
pub const DEFAULT_CATEGORY: &str = "General";

/// Display color for categories outside the built-in set.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// Built-in category colors.
const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Work", "#2563eb"),
    ("Personal", "#16a34a"),
    ("Urgent", "#dc2626"),
];

/// Look up the display color for a category name.
///
/// Categories outside the built-in set render with [`FALLBACK_COLOR`], so an
/// unrecognized label never produces an undefined color.
pub fn category_color(category: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// How an event repeats after its anchor date.
///
/// Recurrence never reaches backward: an event does not occur on any date
/// before its anchor, whatever the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// Occurs exactly once, on the anchor date.
    #[default]
    None,
    /// Every date on or after the anchor.
    Daily,
    /// The anchor's weekday, on or after the anchor.
    Weekly,
    /// The anchor's day-of-month, on or after the anchor. An anchor on day
    /// 29-31 is never clamped; the event simply does not occur in months
    /// that are too short.
    Monthly,
}

/// Error parsing a recurrence name.
#[derive(Error, Debug)]
#[error("unknown recurrence '{0}', expected none|daily|weekly|monthly")]
pub struct ParseRecurrenceError(String);

impl FromStr for Recurrence {
    type Err = ParseRecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            other => Err(ParseRecurrenceError(other.to_string())),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        })
    }
}

/// A calendar event, the sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque stable identifier, assigned at creation and never reused.
    pub id: String,
    /// Display title. Required non-empty; enforced at the write path.
    pub title: String,
    /// Anchor date. Recurrence matching never reaches before it.
    pub date: NaiveDate,
    /// Time-of-day slot. Recurring occurrences repeat at this time.
    pub time: NaiveTime,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub recurrence: Recurrence,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}
