//! # Fire detection
//! Decides once per minute whether one of the alarms must ring now.
//!
//! At most one alarm fires per minute, scan order breaks ties. A check that found nothing releases the
//! minute again, so a later check in the same minute (e.g. after an alarm was configured) still sees it.
use crate::alarm::{AlarmStore, DaySelector, SlotIndex};
use crate::utility::datetime::Timestamp;

/// Check the alarm slots against the current time.
///
/// Returns the index of the first enabled slot set to this hour and minute whose day rule matches, and
/// marks it as the firing slot of the store. A one time alarm erases itself when it fires.
pub fn check_fire(now: &Timestamp, store: &mut AlarmStore) -> Option<SlotIndex> {
    // never fire more than one alarm within a minute
    if store.last_handled_minute == Some(now.minute) {
        trace!("fire check: minute {} already handled", now.minute);
        return None;
    }
    store.last_handled_minute = Some(now.minute);

    for index in SlotIndex::all() {
        let slot = store.slot(index);
        if !slot.get_enabled() || !slot.is_set_to(now.hour, now.minute) {
            continue;
        }
        let matched = match slot.get_day() {
            DaySelector::EachDay => true,
            DaySelector::OneTime => {
                info!("one time alarm {} fired, erasing it", index.number());
                store.slot_mut(index).erase();
                true
            }
            rule => rule.rings_on(now.weekday()),
        };
        if matched {
            info!(
                "alarm {} fires at {:02}:{:02}",
                index.number(),
                now.hour,
                now.minute
            );
            store.set_firing(index);
            return Some(index);
        }
    }

    store.last_handled_minute = None;
    None
}
