//! Per-date slot grid.
//!
//! A day is split into 96 fifteen-minute slots. Each slot is either free or
//! holds the id of the event booked into it. Bookings are all-or-nothing: a
//! range is checked in full before any slot is written.

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use tracing::debug;

use crate::constants::{SLOT_MINUTES, SLOTS_PER_DAY};
use crate::error::{SlotCalError, SlotCalResult};

/// Start time of the slot at `index`.
fn slot_time(index: usize) -> NaiveTime {
    NaiveTime::MIN + Duration::minutes(index as i64 * SLOT_MINUTES)
}

/// Index of the slot starting exactly at `time`, if `time` is on the grid.
fn slot_index(time: NaiveTime) -> Option<usize> {
    let minutes = i64::from(time.hour() * 60 + time.minute());
    let on_grid = time.second() == 0 && time.nanosecond() == 0 && minutes % SLOT_MINUTES == 0;
    on_grid.then_some((minutes / SLOT_MINUTES) as usize)
}

#[derive(Debug, Clone)]
pub struct Day {
    date: NaiveDate,
    slots: Vec<Option<String>>,
}

impl Day {
    pub fn new(date: NaiveDate) -> Self {
        Day {
            date,
            slots: vec![None; SLOTS_PER_DAY],
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// All slots in chronological order.
    pub fn slots(&self) -> impl Iterator<Item = (NaiveTime, Option<&str>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, id)| (slot_time(i), id.as_deref()))
    }

    /// Event booked into the slot starting at `time` (None if free or off-grid).
    pub fn slot(&self, time: NaiveTime) -> Option<&str> {
        slot_index(time).and_then(|i| self.slots[i].as_deref())
    }

    pub fn available_slots(&self) -> Vec<NaiveTime> {
        self.slots()
            .filter(|(_, id)| id.is_none())
            .map(|(time, _)| time)
            .collect()
    }

    pub fn booked_slots(&self, event_id: &str) -> Vec<NaiveTime> {
        self.slots()
            .filter(|(_, id)| *id == Some(event_id))
            .map(|(time, _)| time)
            .collect()
    }

    /// True when no slot is booked.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Indices of slots `s` with `start_at <= s < end_at`.
    fn range(start_at: NaiveTime, end_at: NaiveTime) -> impl Iterator<Item = usize> {
        (0..SLOTS_PER_DAY).filter(move |&i| {
            let slot = slot_time(i);
            start_at <= slot && slot < end_at
        })
    }

    /// First slot in range held by an event other than `owner`.
    pub(crate) fn first_conflict(
        &self,
        start_at: NaiveTime,
        end_at: NaiveTime,
        owner: Option<&str>,
    ) -> Option<NaiveTime> {
        Self::range(start_at, end_at)
            .find(|&i| match self.slots[i].as_deref() {
                None => false,
                Some(id) => Some(id) != owner,
            })
            .map(slot_time)
    }

    fn check_free(
        &self,
        start_at: NaiveTime,
        end_at: NaiveTime,
        owner: Option<&str>,
    ) -> SlotCalResult<()> {
        match self.first_conflict(start_at, end_at, owner) {
            Some(slot) => {
                debug!(date = %self.date, %slot, "Slot already booked");
                Err(SlotCalError::SlotNotAvailable {
                    date: self.date,
                    slot,
                })
            }
            None => Ok(()),
        }
    }

    fn fill(&mut self, event_id: &str, start_at: NaiveTime, end_at: NaiveTime) {
        for i in Self::range(start_at, end_at) {
            self.slots[i] = Some(event_id.to_string());
        }
    }

    /// Book every slot in `[start_at, end_at)` for `event_id`.
    /// Fails without touching the grid if any of them is already booked.
    pub fn add_event(
        &mut self,
        event_id: &str,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> SlotCalResult<()> {
        self.check_free(start_at, end_at, None)?;
        self.fill(event_id, start_at, end_at);

        debug!(%event_id, date = %self.date, %start_at, %end_at, "Booked slots");
        Ok(())
    }

    /// Free every slot held by `event_id`, returning how many were freed.
    pub(crate) fn clear_event(&mut self, event_id: &str) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut() {
            if slot.as_deref() == Some(event_id) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Free every slot held by `event_id`.
    pub fn delete_event(&mut self, event_id: &str) -> SlotCalResult<()> {
        if self.clear_event(event_id) == 0 {
            return Err(SlotCalError::EventNotFound(event_id.to_string()));
        }

        debug!(%event_id, date = %self.date, "Freed slots");
        Ok(())
    }

    /// Move the booking of `event_id` to `[start_at, end_at)`.
    /// Slots the event already holds don't count as conflicts; on conflict
    /// the event keeps its current slots.
    pub fn update_event(
        &mut self,
        event_id: &str,
        start_at: NaiveTime,
        end_at: NaiveTime,
    ) -> SlotCalResult<()> {
        if !self.slots.iter().any(|s| s.as_deref() == Some(event_id)) {
            return Err(SlotCalError::EventNotFound(event_id.to_string()));
        }
        self.check_free(start_at, end_at, Some(event_id))?;

        self.clear_event(event_id);
        self.fill(event_id, start_at, end_at);

        debug!(%event_id, date = %self.date, %start_at, %end_at, "Moved slots");
        Ok(())
    }
}
