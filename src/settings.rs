//! # Settings controller
//! The state machine behind the two-button settings protocol.
//!
//! While browsing, the alarm button cycles through the slots and a long press arms or disarms the selected one.
//! The light button enters the settings cycle, which walks the cursor over the fields of the selected slot in a
//! fixed order. The alarm button changes the field under the cursor, a long press jumps hours and minutes in
//! large steps. Advancing past the last field, or a long press of the light button, ends the cycle.
use crate::alarm::AlarmStore;
use crate::tone::BuzzerNote;

/// The field of an alarm slot the settings cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditField {
    /// Choosing the slot to edit
    AlarmSelect,
    /// The day selector
    Day,
    /// The alarm hour
    Hour,
    /// The alarm minute
    Minute,
    /// The pitch level
    Pitch,
    /// The number of beep rounds
    BeepRounds,
}

impl EditField {
    /// All fields in cursor order.
    pub const ALL: [Self; 6] = [
        Self::AlarmSelect,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Pitch,
        Self::BeepRounds,
    ];

    /// The field after this one, `None` after the last field which ends the settings cycle.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::AlarmSelect => Some(Self::Day),
            Self::Day => Some(Self::Hour),
            Self::Hour => Some(Self::Minute),
            Self::Minute => Some(Self::Pitch),
            Self::Pitch => Some(Self::BeepRounds),
            Self::BeepRounds => None,
        }
    }

    /// Changing this field arms the alarm. Only picking a slot does not.
    pub const fn arms_alarm(self) -> bool {
        !matches!(self, Self::AlarmSelect)
    }
}

/// The state of the settings controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsState {
    /// Not editing, the buttons browse and toggle the slots
    #[default]
    Browsing,
    /// Editing the given field of the selected slot
    Editing(EditField),
}

/// What the face has to play back after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feedback {
    /// Nothing to play
    Silent,
    /// The pitch changed, let the user hear the new note
    PitchPreview(BuzzerNote),
}

/// Drives the settings cursor and applies button input to the alarm store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsController {
    /// The current state
    state: SettingsState,
}

/// State transitions
impl SettingsController {
    /// Create a new `SettingsController` in browsing state
    pub const fn new() -> Self {
        Self {
            state: SettingsState::Browsing,
        }
    }

    /// Get the current state
    pub const fn state(&self) -> SettingsState {
        self.state
    }

    /// Whether the settings cycle is running
    pub const fn is_editing(&self) -> bool {
        matches!(self.state, SettingsState::Editing(_))
    }

    /// The field under the cursor, `None` while browsing
    pub const fn edit_field(&self) -> Option<EditField> {
        match self.state {
            SettingsState::Browsing => None,
            SettingsState::Editing(field) => Some(field),
        }
    }

    /// Start the settings cycle on the slot selection. Does nothing if already editing.
    pub fn enter_edit(&mut self) {
        if self.state == SettingsState::Browsing {
            debug!("settings: entering edit mode");
            self.state = SettingsState::Editing(EditField::AlarmSelect);
        }
    }

    /// Move the cursor to the next field. Past the last field the cycle is complete and the controller
    /// returns to browsing. Returns the new state.
    pub fn advance(&mut self) -> SettingsState {
        if let SettingsState::Editing(field) = self.state {
            self.state = match field.next() {
                Some(next) => SettingsState::Editing(next),
                None => {
                    debug!("settings: cycle complete");
                    SettingsState::Browsing
                }
            };
        }
        self.state
    }

    /// Leave the settings cycle from any field
    pub fn cancel(&mut self) {
        if self.is_editing() {
            debug!("settings: cancelled");
        }
        self.state = SettingsState::Browsing;
    }
}

/// User Input Handling
impl SettingsController {
    /// Flip the enabled flag of the selected slot. Only while browsing.
    pub fn toggle(&self, store: &mut AlarmStore) {
        if self.state == SettingsState::Browsing {
            store.selected_slot_mut().toggle_enabled();
        }
    }

    /// Short press of the alarm button.
    ///
    /// While browsing this selects the next slot. While editing it changes the field under the cursor, and
    /// changing any field but the slot selection arms the selected alarm.
    pub fn increment(&self, store: &mut AlarmStore) -> Feedback {
        let field = match self.state {
            SettingsState::Browsing => {
                store.advance_selection();
                return Feedback::Silent;
            }
            SettingsState::Editing(field) => field,
        };

        let mut feedback = Feedback::Silent;
        match field {
            EditField::AlarmSelect => store.advance_selection(),
            EditField::Day => store.selected_slot_mut().cycle_day(),
            EditField::Hour => store.selected_slot_mut().increment_hour(),
            EditField::Minute => store.selected_slot_mut().increment_minute(),
            EditField::Pitch => {
                let slot = store.selected_slot_mut();
                slot.increment_pitch();
                feedback = Feedback::PitchPreview(slot.note());
            }
            EditField::BeepRounds => store.selected_slot_mut().increment_beep_rounds(),
        }
        if field.arms_alarm() {
            store.selected_slot_mut().set_enabled(true);
        }
        feedback
    }

    /// Long press of the alarm button while editing: hours jump to the next 12 hour boundary, minutes to
    /// the next quarter hour. Other fields stay unchanged, but are still armed like on a short press.
    pub fn long_increment(&self, store: &mut AlarmStore) {
        let SettingsState::Editing(field) = self.state else {
            return;
        };
        let slot = store.selected_slot_mut();
        match field {
            EditField::Hour => slot.jump_hour(),
            EditField::Minute => slot.jump_minute(),
            EditField::AlarmSelect | EditField::Day | EditField::Pitch | EditField::BeepRounds => {}
        }
        if field.arms_alarm() {
            slot.set_enabled(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{DaySelector, SlotIndex};

    /// A controller with the cursor on the given field
    fn editing(field: EditField) -> SettingsController {
        let mut controller = SettingsController::new();
        controller.enter_edit();
        while controller.edit_field() != Some(field) {
            controller.advance();
        }
        controller
    }

    #[test]
    fn full_cycle_returns_to_browsing() {
        let mut controller = SettingsController::new();
        controller.enter_edit();
        assert_eq!(controller.state(), SettingsState::Editing(EditField::AlarmSelect));
        for field in &EditField::ALL[1..] {
            assert_eq!(controller.advance(), SettingsState::Editing(*field));
        }
        assert_eq!(controller.advance(), SettingsState::Browsing);
        assert!(!controller.is_editing());
    }

    #[test]
    fn six_advances_end_the_cycle() {
        let mut controller = SettingsController::new();
        controller.enter_edit();
        for _ in 0..5 {
            controller.advance();
            assert!(controller.is_editing());
        }
        controller.advance();
        assert_eq!(controller.state(), SettingsState::Browsing);
    }

    #[test]
    fn cancel_exits_from_any_field() {
        for field in EditField::ALL {
            let mut controller = editing(field);
            controller.cancel();
            assert_eq!(controller.state(), SettingsState::Browsing);
        }
    }

    #[test]
    fn advance_while_browsing_does_nothing() {
        let mut controller = SettingsController::new();
        assert_eq!(controller.advance(), SettingsState::Browsing);
    }

    #[test]
    fn browsing_cycles_slots_and_toggles() {
        let controller = SettingsController::new();
        let mut store = AlarmStore::new();
        assert_eq!(controller.increment(&mut store), Feedback::Silent);
        assert_eq!(store.selected_index(), SlotIndex::new(1).unwrap());
        assert!(!store.selected_slot().get_enabled());

        controller.toggle(&mut store);
        assert!(store.selected_slot().get_enabled());
        controller.toggle(&mut store);
        assert!(!store.selected_slot().get_enabled());
    }

    #[test]
    fn toggle_is_ignored_while_editing() {
        let controller = editing(EditField::Minute);
        let mut store = AlarmStore::new();
        controller.toggle(&mut store);
        assert!(!store.selected_slot().get_enabled());
    }

    #[test]
    fn slot_selection_does_not_arm() {
        let controller = editing(EditField::AlarmSelect);
        let mut store = AlarmStore::new();
        controller.increment(&mut store);
        controller.long_increment(&mut store);
        assert_eq!(store.selected_index(), SlotIndex::new(1).unwrap());
        assert!(!store.any_enabled());
    }

    #[test]
    fn editing_a_field_arms_the_alarm_for_good() {
        for field in &EditField::ALL[1..] {
            let controller = editing(*field);
            let mut store = AlarmStore::new();
            controller.increment(&mut store);
            assert!(store.selected_slot().get_enabled(), "{field:?}");
            controller.increment(&mut store);
            assert!(store.selected_slot().get_enabled(), "{field:?}");
        }
    }

    #[test]
    fn field_increments_touch_only_their_field() {
        let mut store = AlarmStore::new();
        editing(EditField::Day).increment(&mut store);
        editing(EditField::Hour).increment(&mut store);
        editing(EditField::Minute).increment(&mut store);
        editing(EditField::BeepRounds).increment(&mut store);
        let slot = store.selected_slot();
        assert_eq!(slot.get_day(), DaySelector::OneTime);
        assert_eq!((slot.get_hour(), slot.get_minute()), (1, 1));
        assert_eq!(slot.get_beep_rounds(), 6);
        assert_eq!(slot.get_pitch(), 1);
    }

    #[test]
    fn day_field_has_period_eleven() {
        let controller = editing(EditField::Day);
        let mut store = AlarmStore::new();
        store.selected_slot_mut().set_day(DaySelector::Friday);
        for _ in 0..2 * DaySelector::CYCLE.len() {
            controller.increment(&mut store);
        }
        assert_eq!(store.selected_slot().get_day(), DaySelector::Friday);
    }

    #[test]
    fn pitch_change_requests_a_preview_of_the_new_note() {
        let controller = editing(EditField::Pitch);
        let mut store = AlarmStore::new();
        assert_eq!(
            controller.increment(&mut store),
            Feedback::PitchPreview(BuzzerNote::A8)
        );
        assert_eq!(
            controller.increment(&mut store),
            Feedback::PitchPreview(BuzzerNote::B6)
        );
    }

    #[test]
    fn long_press_jumps_hours_and_minutes() {
        let mut store = AlarmStore::new();
        store.selected_slot_mut().set_time(10, 50);
        editing(EditField::Hour).long_increment(&mut store);
        editing(EditField::Minute).long_increment(&mut store);
        assert!(store.selected_slot().is_set_to(12, 0));

        store.selected_slot_mut().set_time(13, 0);
        editing(EditField::Hour).long_increment(&mut store);
        assert_eq!(store.selected_slot().get_hour(), 0);
        assert!(store.selected_slot().get_enabled());
    }

    #[test]
    fn long_press_on_other_fields_only_arms() {
        let mut store = AlarmStore::new();
        let before = *store.selected_slot();
        editing(EditField::Pitch).long_increment(&mut store);
        let after = *store.selected_slot();
        assert!(after.get_enabled());
        assert_eq!(after.get_pitch(), before.get_pitch());
        assert_eq!(after.get_day(), before.get_day());
    }

    #[test]
    fn long_press_while_browsing_changes_nothing() {
        let controller = SettingsController::new();
        let mut store = AlarmStore::new();
        controller.long_increment(&mut store);
        assert_eq!(store, AlarmStore::new());
    }
}
