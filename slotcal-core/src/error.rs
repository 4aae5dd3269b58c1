//! Error types for slotcal.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Errors that can occur in calendar operations.
///
/// Every variant is a rejected request: the calendar is left exactly as it
/// was before the failing call.
#[derive(Error, Debug)]
pub enum SlotCalError {
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Reminder {index} not found for event '{event_id}'")]
    ReminderNotFound { event_id: String, index: usize },

    #[error("Slot {slot} on {date} is not available")]
    SlotNotAvailable { date: NaiveDate, slot: NaiveTime },

    #[error("Date {date} is before today ({today})")]
    DateLowerThanToday { date: NaiveDate, today: NaiveDate },

    #[error("Invalid time range: {start_at} - {end_at}")]
    InvalidTimeRange {
        start_at: NaiveTime,
        end_at: NaiveTime,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for slotcal operations.
pub type SlotCalResult<T> = Result<T, SlotCalError>;
