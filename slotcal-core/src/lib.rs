//! In-memory calendar with slot booking.
//!
//! A [`Calendar`] owns one [`Day`] grid per booked date and every [`Event`]:
//! - each day has 96 fifteen-minute slots holding at most one event id
//! - events carry an ordered list of [`Reminder`]s
//! - bookings are all-or-nothing; a failed call leaves the calendar unchanged

pub mod calendar;
pub mod clock;
pub mod config;
pub mod constants;
pub mod day;
pub mod error;
pub mod event;
pub mod id;

pub use calendar::Calendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CalendarConfig;
pub use day::Day;
pub use error::{SlotCalError, SlotCalResult};
pub use event::{Event, Reminder, ReminderKind};
pub use id::{IdGenerator, SequentialIds, UuidGenerator};
