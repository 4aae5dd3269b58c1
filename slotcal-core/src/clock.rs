//! Source of "today" for the past-date check.

use chrono::{Local, NaiveDate};

/// Reports the current date.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock date in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
