//! # Alarm slots
//! The ten alarm slots of the face and the store that owns them.
//!
//! The store is an arena: a fixed array of slots plus the index of the slot being browsed or edited and
//! the index of the slot that matched during the latest fire check. Nothing outside the store holds a
//! reference to a slot, everything else works with a `SlotIndex`.
use crate::tone::{AlarmTune, BuzzerNote};

/// Number of alarm slots.
pub const ALARM_SLOTS: usize = 10;

/// Number of pitch levels a slot can select from.
pub const PITCH_LEVELS: u8 = 3;

/// Number of beep round settings, stored as 0-8 and played as 1-9 rounds.
pub const BEEP_ROUND_SETTINGS: u8 = 9;

/// The rule deciding on which days an alarm is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaySelector {
    /// Rings every day
    #[default]
    EachDay,
    /// Rings once and erases itself afterwards
    OneTime,
    /// Rings Monday to Friday
    Workday,
    /// Rings on Saturday and Sunday
    Weekend,
    /// Rings on Mondays
    Monday,
    /// Rings on Tuesdays
    Tuesday,
    /// Rings on Wednesdays
    Wednesday,
    /// Rings on Thursdays
    Thursday,
    /// Rings on Fridays
    Friday,
    /// Rings on Saturdays
    Saturday,
    /// Rings on Sundays
    Sunday,
}

impl DaySelector {
    /// All selectors in the order the day setting cycles through them.
    pub const CYCLE: [Self; 11] = [
        Self::EachDay,
        Self::OneTime,
        Self::Workday,
        Self::Weekend,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// The selector following this one in the settings cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        // declaration order is the cycle order
        Self::CYCLE[(self as usize + 1) % Self::CYCLE.len()]
    }

    /// Two character label shown in the day position of the display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::EachDay => "ED",
            Self::OneTime => "1t",
            Self::Workday => "MF",
            Self::Weekend => "WN",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// The weekday index (Monday is 0) of a single day selector.
    pub const fn weekday(self) -> Option<u8> {
        match self {
            Self::Monday => Some(0),
            Self::Tuesday => Some(1),
            Self::Wednesday => Some(2),
            Self::Thursday => Some(3),
            Self::Friday => Some(4),
            Self::Saturday => Some(5),
            Self::Sunday => Some(6),
            Self::EachDay | Self::OneTime | Self::Workday | Self::Weekend => None,
        }
    }

    /// Whether an alarm with this selector rings on the given weekday (Monday is 0).
    pub const fn rings_on(self, weekday: u8) -> bool {
        match self {
            Self::EachDay | Self::OneTime => true,
            Self::Workday => weekday < 5,
            Self::Weekend => weekday >= 5,
            single => match single.weekday() {
                Some(day) => day == weekday,
                None => false,
            },
        }
    }
}

/// Index of one of the alarm slots, always below `ALARM_SLOTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// The first slot
    pub const FIRST: Self = Self(0);

    /// Create a new `SlotIndex`, `None` if the index is out of range.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(index: usize) -> Option<Self> {
        if index < ALARM_SLOTS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// The index into the slot array
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    /// The slot number shown to the user, starting at 1
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// The next slot, wrapping from the last to the first.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % ALARM_SLOTS as u8)
    }

    /// All slot indices in scan order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ALARM_SLOTS).filter_map(Self::new)
    }
}

/// The configuration of one alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmSlot {
    /// The hour of the alarm, 0-23
    hour: u8,
    /// The minute of the alarm, 0-59
    minute: u8,
    /// The days the alarm rings on
    day: DaySelector,
    /// The pitch level, 0-2
    pitch: u8,
    /// The beep rounds setting, 0-8, the alarm plays one round more than this
    beep_rounds: u8,
    /// The alarm is enabled or disabled
    enabled: bool,
}

impl Default for AlarmSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmSlot {
    /// Create a new `AlarmSlot` with default values: every day at 00:00, middle pitch, six rounds, disabled.
    pub const fn new() -> Self {
        Self {
            hour: 0,
            minute: 0,
            day: DaySelector::EachDay,
            pitch: 1,
            beep_rounds: 5,
            enabled: false,
        }
    }

    /// Get the alarm hour
    pub const fn get_hour(&self) -> u8 {
        self.hour
    }

    /// Get the alarm minute
    pub const fn get_minute(&self) -> u8 {
        self.minute
    }

    /// Get the day selector
    pub const fn get_day(&self) -> DaySelector {
        self.day
    }

    /// Get the pitch level
    pub const fn get_pitch(&self) -> u8 {
        self.pitch
    }

    /// Get the stored beep rounds setting, 0-8
    pub const fn get_beep_rounds(&self) -> u8 {
        self.beep_rounds
    }

    /// Get the number of rounds the alarm plays, 1-9
    pub const fn rounds_to_play(&self) -> u8 {
        self.beep_rounds + 1
    }

    /// Get the enabled state
    pub const fn get_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the alarm time. Out of range values wrap around.
    pub const fn set_time(&mut self, hour: u8, minute: u8) {
        self.hour = hour % 24;
        self.minute = minute % 60;
    }

    /// Set the day selector
    pub const fn set_day(&mut self, day: DaySelector) {
        self.day = day;
    }

    /// Set the enabled state
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Toggle the enabled state
    pub const fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Advance the day selector along its settings cycle
    pub const fn cycle_day(&mut self) {
        self.day = self.day.next();
    }

    /// Increment the alarm hour
    pub const fn increment_hour(&mut self) {
        self.hour = (self.hour + 1) % 24;
    }

    /// Increment the alarm minute
    pub const fn increment_minute(&mut self) {
        self.minute = (self.minute + 1) % 60;
    }

    /// Jump to the next 12 hour boundary: 10 becomes 12, 13 becomes 0.
    pub const fn jump_hour(&mut self) {
        self.hour = ((self.hour / 12) * 12 + 12) % 24;
    }

    /// Jump to the next quarter hour: 50 becomes 0, 15 becomes 30.
    pub const fn jump_minute(&mut self) {
        self.minute = ((self.minute / 15) * 15 + 15) % 60;
    }

    /// Increment the pitch level
    pub const fn increment_pitch(&mut self) {
        self.pitch = (self.pitch + 1) % PITCH_LEVELS;
    }

    /// Increment the beep rounds setting
    pub const fn increment_beep_rounds(&mut self) {
        self.beep_rounds = (self.beep_rounds + 1) % BEEP_ROUND_SETTINGS;
    }

    /// The buzzer note of the selected pitch level
    pub const fn note(&self) -> BuzzerNote {
        BuzzerNote::for_pitch(self.pitch)
    }

    /// The tune played when this alarm fires
    pub fn tune(&self) -> AlarmTune {
        AlarmTune::new(self.rounds_to_play(), self.note())
    }

    /// Erase a fired one time alarm: back to every day at 00:00 and disabled.
    /// Pitch and beep rounds stay as they were.
    pub const fn erase(&mut self) {
        self.day = DaySelector::EachDay;
        self.hour = 0;
        self.minute = 0;
        self.enabled = false;
    }

    /// Whether the alarm is set to the given hour and minute
    pub const fn is_set_to(&self, hour: u8, minute: u8) -> bool {
        self.hour == hour && self.minute == minute
    }
}

/// All the alarm data of the face is kept in this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmStore {
    /// The alarm slots
    slots: [AlarmSlot; ALARM_SLOTS],
    /// The slot currently browsed or edited
    selected: SlotIndex,
    /// The slot that matched during the latest fire check, until it is played
    firing: Option<SlotIndex>,
    /// The RTC minute the fire check last ran in, `None` if the next check must run in any case
    pub(crate) last_handled_minute: Option<u8>,
}

impl Default for AlarmStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmStore {
    /// Create a new `AlarmStore` with all slots at their defaults and the first slot selected.
    pub const fn new() -> Self {
        Self {
            slots: [AlarmSlot::new(); ALARM_SLOTS],
            selected: SlotIndex::FIRST,
            firing: None,
            last_handled_minute: None,
        }
    }

    /// Get all slots
    pub const fn slots(&self) -> &[AlarmSlot; ALARM_SLOTS] {
        &self.slots
    }

    /// Get a slot
    pub const fn slot(&self, index: SlotIndex) -> &AlarmSlot {
        &self.slots[index.get()]
    }

    /// Get a slot for modification
    pub const fn slot_mut(&mut self, index: SlotIndex) -> &mut AlarmSlot {
        &mut self.slots[index.get()]
    }

    /// Get the index of the selected slot
    pub const fn selected_index(&self) -> SlotIndex {
        self.selected
    }

    /// Get the selected slot
    pub const fn selected_slot(&self) -> &AlarmSlot {
        self.slot(self.selected)
    }

    /// Get the selected slot for modification
    pub const fn selected_slot_mut(&mut self) -> &mut AlarmSlot {
        self.slot_mut(self.selected)
    }

    /// Select the next slot, wrapping from the last to the first
    pub const fn advance_selection(&mut self) {
        self.selected = self.selected.next();
    }

    /// Whether any slot is enabled
    pub fn any_enabled(&self) -> bool {
        self.slots.iter().any(AlarmSlot::get_enabled)
    }

    /// Get the index of the slot that matched during the latest fire check
    pub const fn firing_index(&self) -> Option<SlotIndex> {
        self.firing
    }

    /// Mark a slot as firing
    pub(crate) const fn set_firing(&mut self, index: SlotIndex) {
        self.firing = Some(index);
    }

    /// Consume the firing slot, returning the tune to play
    pub fn take_firing_tune(&mut self) -> Option<AlarmTune> {
        self.firing.take().map(|index| self.slot(index).tune())
    }

    /// Get the minute the fire check last handled
    pub const fn last_handled_minute(&self) -> Option<u8> {
        self.last_handled_minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let slot = AlarmSlot::new();
        assert_eq!(slot.get_day(), DaySelector::EachDay);
        assert_eq!(slot.get_beep_rounds(), 5);
        assert_eq!(slot.rounds_to_play(), 6);
        assert_eq!(slot.get_pitch(), 1);
        assert!(!slot.get_enabled());
        assert_eq!((slot.get_hour(), slot.get_minute()), (0, 0));

        let store = AlarmStore::new();
        assert_eq!(store.selected_index(), SlotIndex::FIRST);
        assert_eq!(store.firing_index(), None);
        assert_eq!(store.last_handled_minute(), None);
        assert!(!store.any_enabled());
    }

    #[test]
    fn day_cycle_visits_every_selector_once() {
        let mut day = DaySelector::EachDay;
        for expected in DaySelector::CYCLE {
            assert_eq!(day, expected);
            day = day.next();
        }
        assert_eq!(day, DaySelector::EachDay);
    }

    #[test]
    fn day_cycle_follows_declaration_order() {
        for (position, day) in DaySelector::CYCLE.iter().enumerate() {
            assert_eq!(*day as usize, position);
            let following = DaySelector::CYCLE[(position + 1) % DaySelector::CYCLE.len()];
            assert_eq!(day.next(), following);
        }
        assert_eq!(DaySelector::Sunday.next(), DaySelector::EachDay);
    }

    #[test]
    fn increments_are_cyclic() {
        let mut slot = AlarmSlot::new();
        slot.set_time(7, 42);
        let start = slot;
        for _ in 0..3 * DaySelector::CYCLE.len() {
            slot.cycle_day();
        }
        for _ in 0..2 * 24 {
            slot.increment_hour();
        }
        for _ in 0..60 {
            slot.increment_minute();
        }
        for _ in 0..4 * PITCH_LEVELS {
            slot.increment_pitch();
        }
        for _ in 0..BEEP_ROUND_SETTINGS {
            slot.increment_beep_rounds();
        }
        assert_eq!(slot, start);
    }

    #[test]
    fn increments_wrap_at_their_ranges() {
        let mut slot = AlarmSlot::new();
        slot.set_time(23, 59);
        slot.increment_hour();
        slot.increment_minute();
        assert_eq!((slot.get_hour(), slot.get_minute()), (0, 0));
        slot.increment_pitch();
        slot.increment_pitch();
        assert_eq!(slot.get_pitch(), 0);
        for _ in 0..3 {
            slot.increment_beep_rounds();
        }
        assert_eq!(slot.get_beep_rounds(), 8);
        slot.increment_beep_rounds();
        assert_eq!(slot.get_beep_rounds(), 0);
    }

    #[test]
    fn jumps_go_to_the_next_boundary() {
        let mut slot = AlarmSlot::new();
        slot.set_time(10, 50);
        slot.jump_hour();
        slot.jump_minute();
        assert_eq!((slot.get_hour(), slot.get_minute()), (12, 0));
        slot.set_time(13, 14);
        slot.jump_hour();
        slot.jump_minute();
        assert_eq!((slot.get_hour(), slot.get_minute()), (0, 15));
        slot.jump_minute();
        assert_eq!(slot.get_minute(), 30);
    }

    #[test]
    fn selector_rules() {
        assert!(DaySelector::Workday.rings_on(0));
        assert!(DaySelector::Workday.rings_on(4));
        assert!(!DaySelector::Workday.rings_on(5));
        assert!(DaySelector::Weekend.rings_on(6));
        assert!(!DaySelector::Weekend.rings_on(2));
        assert!(DaySelector::Wednesday.rings_on(2));
        assert!(!DaySelector::Wednesday.rings_on(3));
        assert_eq!(DaySelector::Sunday.weekday(), Some(6));
        assert_eq!(DaySelector::Workday.weekday(), None);
    }

    #[test]
    fn selection_wraps_after_the_last_slot() {
        let mut store = AlarmStore::new();
        for _ in 0..ALARM_SLOTS - 1 {
            store.advance_selection();
        }
        assert_eq!(store.selected_index().number(), 10);
        store.advance_selection();
        assert_eq!(store.selected_index(), SlotIndex::FIRST);
        assert_eq!(SlotIndex::new(ALARM_SLOTS), None);
        assert_eq!(SlotIndex::all().count(), ALARM_SLOTS);
    }

    #[test]
    fn any_enabled_tracks_every_slot() {
        let mut store = AlarmStore::new();
        let last = SlotIndex::new(9).unwrap();
        store.slot_mut(last).set_enabled(true);
        assert!(store.any_enabled());
        store.slot_mut(last).toggle_enabled();
        assert!(!store.any_enabled());
    }

    #[test]
    fn erase_keeps_tone_settings() {
        let mut slot = AlarmSlot::new();
        slot.set_time(6, 30);
        slot.set_day(DaySelector::OneTime);
        slot.increment_pitch();
        slot.set_enabled(true);
        slot.erase();
        assert_eq!(slot.get_day(), DaySelector::EachDay);
        assert_eq!((slot.get_hour(), slot.get_minute()), (0, 0));
        assert!(!slot.get_enabled());
        assert_eq!(slot.get_pitch(), 2);
    }

    #[test]
    fn firing_tune_is_consumed_once() {
        let mut store = AlarmStore::new();
        let third = SlotIndex::new(2).unwrap();
        store.slot_mut(third).increment_pitch();
        store.set_firing(third);
        let tune = store.take_firing_tune().unwrap();
        assert_eq!(tune.get_rounds(), 6);
        assert_eq!(tune.get_note(), BuzzerNote::A8);
        assert_eq!(store.take_firing_tune(), None);
    }
}
