//! Calendar registry: owns every day grid and every event.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::CalendarConfig;
use crate::day::Day;
use crate::error::{SlotCalError, SlotCalResult};
use crate::event::{Event, Reminder, ReminderKind};
use crate::id::{IdGenerator, UuidGenerator};

/// Events and their day grids.
///
/// All mutating operations validate before they write, so an `Err` always
/// means nothing changed. Access from several threads must be serialized by
/// the caller.
pub struct Calendar {
    days: BTreeMap<NaiveDate, Day>,
    events: HashMap<String, Event>,
    config: CalendarConfig,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    pub fn new() -> Self {
        Self::with_config(CalendarConfig::default())
    }

    pub fn with_config(config: CalendarConfig) -> Self {
        Calendar {
            days: BTreeMap::new(),
            events: HashMap::new(),
            config,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    // VALIDATION:

    fn check_date(&self, date: NaiveDate) -> SlotCalResult<()> {
        if self.config.allow_past_dates {
            return Ok(());
        }

        let today = self.clock.today();
        if date < today {
            debug!(%date, %today, "Rejected event in the past");
            return Err(SlotCalError::DateLowerThanToday { date, today });
        }
        Ok(())
    }

    fn check_range(&self, start_at: NaiveTime, end_at: NaiveTime) -> SlotCalResult<()> {
        if self.config.reject_empty_ranges && start_at >= end_at {
            return Err(SlotCalError::InvalidTimeRange { start_at, end_at });
        }
        Ok(())
    }

    /// Check that `[start_at, end_at)` on `date` is free, ignoring slots held by `owner`.
    fn check_slots(
        &self,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
        owner: Option<&str>,
    ) -> SlotCalResult<()> {
        let conflict = self
            .days
            .get(&date)
            .and_then(|day| day.first_conflict(start_at, end_at, owner));

        match conflict {
            Some(slot) => Err(SlotCalError::SlotNotAvailable { date, slot }),
            None => Ok(()),
        }
    }

    fn event_mut(&mut self, event_id: &str) -> SlotCalResult<&mut Event> {
        self.events
            .get_mut(event_id)
            .ok_or_else(|| SlotCalError::EventNotFound(event_id.to_string()))
    }

    fn release_slots(&mut self, event_id: &str, date: NaiveDate) {
        if let Some(day) = self.days.get_mut(&date) {
            day.clear_event(event_id);
            if self.config.prune_empty_days && day.is_empty() {
                self.days.remove(&date);
                debug!(%date, "Dropped empty day");
            }
        }
    }

    // EVENTS:

    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.get(event_id)
    }

    /// Events booked on `date`, ordered by start time.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.values().filter(|e| e.date == date).collect();
        events.sort_by(|a, b| a.start_at.cmp(&b.start_at).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.get(&date)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Create an event, book its slots and return its new id.
    pub fn add_event(
        &mut self,
        title: &str,
        description: &str,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> SlotCalResult<String> {
        self.check_date(date)?;
        self.check_range(start_at, end_at)?;

        let event_id = self.ids.next_id();
        self.days
            .entry(date)
            .or_insert_with(|| Day::new(date))
            .add_event(&event_id, start_at, end_at)?;

        let event = Event::new(&event_id, title, description, date, start_at, end_at);
        self.events.insert(event_id.clone(), event);

        debug!(%event_id, %date, "Added event");
        Ok(event_id)
    }

    /// Remove an event and free its slots.
    pub fn delete_event(&mut self, event_id: &str) -> SlotCalResult<Event> {
        let event = self
            .events
            .remove(event_id)
            .ok_or_else(|| SlotCalError::EventNotFound(event_id.to_string()))?;

        self.release_slots(event_id, event.date);

        debug!(%event_id, date = %event.date, "Deleted event");
        Ok(event)
    }

    /// Replace an event with a new one and return the new id.
    ///
    /// The old id stops existing and its reminders are dropped. Use
    /// [`Calendar::edit_event`] to keep the id.
    pub fn update_event(
        &mut self,
        event_id: &str,
        title: &str,
        description: &str,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> SlotCalResult<String> {
        let old_date = self
            .event(event_id)
            .map(|e| e.date)
            .ok_or_else(|| SlotCalError::EventNotFound(event_id.to_string()))?;

        self.check_date(date)?;
        self.check_range(start_at, end_at)?;
        let owner = (date == old_date).then_some(event_id);
        self.check_slots(date, start_at, end_at, owner)?;

        self.delete_event(event_id)?;
        let new_id = self.add_event(title, description, date, start_at, end_at)?;

        debug!(old_id = %event_id, new_id = %new_id, "Replaced event");
        Ok(new_id)
    }

    /// Change an event's fields and time in place, keeping its id and reminders.
    pub fn edit_event(
        &mut self,
        event_id: &str,
        title: &str,
        description: &str,
        date: NaiveDate,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> SlotCalResult<()> {
        let old_date = self
            .event(event_id)
            .map(|e| e.date)
            .ok_or_else(|| SlotCalError::EventNotFound(event_id.to_string()))?;

        self.check_date(date)?;
        self.check_range(start_at, end_at)?;

        if date == old_date {
            let day = self.days.entry(date).or_insert_with(|| Day::new(date));
            if day.booked_slots(event_id).is_empty() {
                // Nothing held yet (range without a slot boundary)
                day.add_event(event_id, start_at, end_at)?;
            } else {
                day.update_event(event_id, start_at, end_at)?;
            }
            if self.config.prune_empty_days && day.is_empty() {
                self.days.remove(&date);
            }
        } else {
            self.days
                .entry(date)
                .or_insert_with(|| Day::new(date))
                .add_event(event_id, start_at, end_at)?;
            self.release_slots(event_id, old_date);
        }

        let event = self.event_mut(event_id)?;
        event.title = title.to_string();
        event.description = description.to_string();
        event.date = date;
        event.start_at = start_at;
        event.end_at = end_at;

        debug!(%event_id, %date, "Edited event");
        Ok(())
    }

    /// Free slots on `date`, in chronological order. Empty for dates never booked.
    pub fn find_available_slots(&self, date: NaiveDate) -> Vec<NaiveTime> {
        self.days
            .get(&date)
            .map(Day::available_slots)
            .unwrap_or_default()
    }

    /// Drop every day with no booked slot. Returns how many were dropped.
    pub fn prune_empty_days(&mut self) -> usize {
        let before = self.days.len();
        self.days.retain(|_, day| !day.is_empty());
        let pruned = before - self.days.len();

        if pruned > 0 {
            info!(pruned, "Pruned empty days");
        }
        pruned
    }

    // REMINDERS:

    pub fn add_reminder(
        &mut self,
        event_id: &str,
        date_time: NaiveDateTime,
        kind: ReminderKind,
    ) -> SlotCalResult<()> {
        self.event_mut(event_id)?.add_reminder(date_time, kind);

        debug!(%event_id, %date_time, %kind, "Added reminder");
        Ok(())
    }

    pub fn delete_reminder(&mut self, event_id: &str, index: usize) -> SlotCalResult<Reminder> {
        let reminder = self.event_mut(event_id)?.delete_reminder(index)?;

        debug!(%event_id, index, "Deleted reminder");
        Ok(reminder)
    }

    /// Copy of the event's reminders, in insertion order.
    pub fn list_reminders(&self, event_id: &str) -> SlotCalResult<Vec<Reminder>> {
        self.event(event_id)
            .map(|e| e.reminders().to_vec())
            .ok_or_else(|| SlotCalError::EventNotFound(event_id.to_string()))
    }
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("days", &self.days.len())
            .field("events", &self.events.len())
            .field("config", &self.config)
            .finish()
    }
}
