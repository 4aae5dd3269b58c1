//! Slot grid dimensions.

/// Length of one bookable slot.
pub const SLOT_MINUTES: i64 = 15;

/// Number of slots in a day (24h / 15min).
pub const SLOTS_PER_DAY: usize = 96;
