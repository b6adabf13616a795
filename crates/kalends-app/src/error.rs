//! Error types for calendar mutations and persistence.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Why a create/update/move was rejected. All variants are recoverable:
/// the event list and the stored blob are left untouched.
#[derive(Error, Debug)]
pub enum SaveError {
    /// A required form field was missing or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Another event, literal or recurring, already claims the slot.
    #[error("event conflict at {date} {time}, choose another time")]
    Conflict { date: NaiveDate, time: NaiveTime },

    /// The edit/move target id is not in the event list.
    #[error("no event with id {0}")]
    UnknownEvent(String),
}

/// Persistence failures. Reads never produce these (a missing or corrupt
/// blob loads as an empty list); writes report them so callers can log.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write event store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize events: {0}")]
    Serialize(#[from] serde_json::Error),
}
