//! Events and their reminders.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{SlotCalError, SlotCalResult};

/// A calendar event booked on a single date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_at: NaiveTime,
    /// Exclusive upper bound
    pub end_at: NaiveTime,

    // Deleted by position, so insertion order matters
    reminders: Vec<Reminder>,
}

/// How a reminder is delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    #[default]
    Email,
    System,
}

/// A timestamped notification attached to an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub date_time: NaiveDateTime,
    #[serde(default)]
    pub kind: ReminderKind,
}

impl Reminder {
    pub fn new(date_time: NaiveDateTime, kind: ReminderKind) -> Self {
        Reminder { date_time, kind }
    }
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> Self {
        Event {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            date,
            start_at,
            end_at,
            reminders: Vec::new(),
        }
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Append a reminder. The timestamp is not checked against the event's own date.
    pub fn add_reminder(&mut self, date_time: NaiveDateTime, kind: ReminderKind) {
        self.reminders.push(Reminder::new(date_time, kind));
    }

    /// Remove the reminder at `index` and return it.
    /// Reminders after it shift down by one position.
    pub fn delete_reminder(&mut self, index: usize) -> SlotCalResult<Reminder> {
        if index >= self.reminders.len() {
            return Err(SlotCalError::ReminderNotFound {
                event_id: self.id.clone(),
                index,
            });
        }
        Ok(self.reminders.remove(index))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Event title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Time: {} - {}", self.start_at, self.end_at)
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reminder on {} of type {}", self.date_time, self.kind)
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReminderKind::Email => write!(f, "email"),
            ReminderKind::System => write!(f, "system"),
        }
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(ReminderKind::Email),
            "system" => Ok(ReminderKind::System),
            other => Err(format!(
                "Invalid reminder type '{}'. Expected 'email' or 'system'",
                other
            )),
        }
    }
}
