use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slotcal_core::{Calendar, FixedClock, ReminderKind, SequentialIds, SlotCalError};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, d).unwrap()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn stamp(d: u32, h: u32) -> NaiveDateTime {
    date(d).and_time(at(h, 0))
}

fn calendar_with_event() -> (Calendar, String) {
    let mut cal = Calendar::new()
        .with_clock(FixedClock(date(1)))
        .with_id_generator(SequentialIds::new("evt"));
    let id = cal
        .add_event("Review", "Design review", date(10), at(14, 0), at(15, 0))
        .unwrap();
    (cal, id)
}

#[test]
fn add_then_list_then_delete() {
    let (mut cal, id) = calendar_with_event();

    cal.add_reminder(&id, stamp(10, 13), ReminderKind::System)
        .unwrap();

    let reminders = cal.list_reminders(&id).unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].date_time, stamp(10, 13));
    assert_eq!(reminders[0].kind, ReminderKind::System);

    let removed = cal.delete_reminder(&id, 0).unwrap();
    assert_eq!(removed.kind, ReminderKind::System);
    assert!(cal.list_reminders(&id).unwrap().is_empty());
}

#[test]
fn listed_reminders_are_a_snapshot() {
    let (mut cal, id) = calendar_with_event();
    cal.add_reminder(&id, stamp(9, 9), ReminderKind::Email)
        .unwrap();

    let mut snapshot = cal.list_reminders(&id).unwrap();
    snapshot.clear();

    assert_eq!(cal.list_reminders(&id).unwrap().len(), 1);
}

#[test]
fn indices_shift_after_delete() {
    let (mut cal, id) = calendar_with_event();
    for hour in [8, 9, 10] {
        cal.add_reminder(&id, stamp(10, hour), ReminderKind::Email)
            .unwrap();
    }

    cal.delete_reminder(&id, 0).unwrap();
    let remaining: Vec<_> = cal
        .list_reminders(&id)
        .unwrap()
        .into_iter()
        .map(|r| r.date_time)
        .collect();
    assert_eq!(remaining, vec![stamp(10, 9), stamp(10, 10)]);

    assert!(matches!(
        cal.delete_reminder(&id, 2),
        Err(SlotCalError::ReminderNotFound { index: 2, .. })
    ));
}

#[test]
fn unknown_event_is_reported() {
    let (mut cal, _) = calendar_with_event();

    assert!(matches!(
        cal.add_reminder("missing", stamp(10, 9), ReminderKind::Email),
        Err(SlotCalError::EventNotFound(_))
    ));
    assert!(matches!(
        cal.list_reminders("missing"),
        Err(SlotCalError::EventNotFound(_))
    ));
    assert!(matches!(
        cal.delete_reminder("missing", 0),
        Err(SlotCalError::EventNotFound(_))
    ));
}

#[test]
fn edit_keeps_reminders_update_drops_them() {
    let (mut cal, id) = calendar_with_event();
    cal.add_reminder(&id, stamp(10, 13), ReminderKind::Email)
        .unwrap();

    cal.edit_event(&id, "Review", "", date(10), at(15, 0), at(16, 0))
        .unwrap();
    assert_eq!(cal.list_reminders(&id).unwrap().len(), 1);

    let new_id = cal
        .update_event(&id, "Review", "", date(10), at(15, 0), at(16, 0))
        .unwrap();
    assert!(cal.list_reminders(&new_id).unwrap().is_empty());
}
