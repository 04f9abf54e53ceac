//! # Presentation
//! Derives what the segment display shows from the alarm store and the settings state.
//!
//! The display line is ten characters wide:
//!
//! ```text
//!  0 1 | 2 3 | 4 5 | 6 7 | 8 | 9
//!  day | no. | hour| min |   | rounds
//! ```
//!
//! While editing, the characters of the field under the cursor are blanked on every odd sub-second tick,
//! which makes them blink at half the tick rate.
use core::fmt::Write;

use heapless::String;

use crate::alarm::AlarmStore;
use crate::settings::{EditField, SettingsController};

/// Number of character positions on the display line.
pub const FRAME_WIDTH: usize = 10;

/// Day label shown while browsing.
const BROWSING_LABEL: &str = "AL";

/// Segment coordinates (row, column) of the pitch level bar, lowest level first.
pub const PITCH_SEGMENTS: [(u8, u8); 3] = [(0, 3), (1, 3), (2, 2)];

/// The character positions that blink for a field.
const fn blink_positions(field: EditField) -> (usize, usize) {
    match field {
        EditField::AlarmSelect => (2, 3),
        EditField::Day => (0, 1),
        EditField::Hour => (4, 5),
        EditField::Minute => (6, 7),
        EditField::Pitch => (8, 8),
        EditField::BeepRounds => (9, 9),
    }
}

/// Position of the beep rounds digit, blank while browsing.
const BEEP_ROUNDS_POSITION: usize = 9;

/// The indicator segments the alarm face drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Indicators {
    /// The bell, lit while the selected alarm is enabled
    pub bell: bool,
    /// The PM indicator, only ever lit in 12 hour mode
    pub pm: bool,
}

/// One rendered state of the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The characters of the display line, ASCII only
    text: [u8; FRAME_WIDTH],
    /// The indicator segments
    indicators: Indicators,
    /// Number of lit pitch bar segments, 0-3
    pitch_segments: u8,
}

impl Frame {
    /// The display line
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.text).unwrap_or_default()
    }

    /// The indicator segments
    pub const fn indicators(&self) -> Indicators {
        self.indicators
    }

    /// Number of lit pitch bar segments
    pub const fn pitch_segments(&self) -> u8 {
        self.pitch_segments
    }

    /// Coordinates of the lit pitch bar segments
    pub fn lit_pitch_segments(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        PITCH_SEGMENTS.iter().copied().take(self.pitch_segments as usize)
    }

    /// Blank a character position
    const fn blank(&mut self, position: usize) {
        if position < FRAME_WIDTH {
            self.text[position] = b' ';
        }
    }
}

/// Convert a 24 hour value for display: `(shown hour, pm)`.
/// In 12 hour mode midnight and noon show as 12.
pub const fn display_hour(hour: u8, clock_mode_24h: bool) -> (u8, bool) {
    if clock_mode_24h {
        return (hour, false);
    }
    let shown = match hour % 12 {
        0 => 12,
        h => h,
    };
    (shown, hour >= 12)
}

/// Build the display frame for the selected slot.
///
/// `subsecond` is the tick counter within the current second, odd values blank the blinking field.
pub fn format_frame(
    store: &AlarmStore,
    settings: &SettingsController,
    clock_mode_24h: bool,
    subsecond: u8,
) -> Frame {
    let slot = store.selected_slot();
    let field = settings.edit_field();
    let label = field.map_or(BROWSING_LABEL, |_| slot.get_day().label());
    let (hour, pm) = display_hour(slot.get_hour(), clock_mode_24h);

    let mut line: String<FRAME_WIDTH> = String::new();
    // every value is range bound, the line always fits
    let _ = write!(
        line,
        "{}{:>2}{:>2}{:02} {}",
        label,
        store.selected_index().number(),
        hour,
        slot.get_minute(),
        slot.rounds_to_play()
    );
    let mut text = [b' '; FRAME_WIDTH];
    for (target, byte) in text.iter_mut().zip(line.as_bytes()) {
        *target = *byte;
    }

    let mut frame = Frame {
        text,
        indicators: Indicators {
            bell: slot.get_enabled(),
            pm,
        },
        pitch_segments: 0,
    };

    let blink_off = subsecond % 2 == 1;
    match field {
        None => {
            // the round count only confuses at a glance, show it while editing
            frame.blank(BEEP_ROUNDS_POSITION);
        }
        Some(field) => {
            if blink_off {
                let (first, second) = blink_positions(field);
                frame.blank(first);
                frame.blank(second);
            }
            if !(blink_off && field == EditField::Pitch) {
                frame.pitch_segments = slot.get_pitch() + 1;
            }
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::DaySelector;

    /// A controller with the cursor on the given field
    fn editing(field: EditField) -> SettingsController {
        let mut controller = SettingsController::new();
        controller.enter_edit();
        while controller.edit_field() != Some(field) {
            controller.advance();
        }
        controller
    }

    fn store_at(hour: u8, minute: u8) -> AlarmStore {
        let mut store = AlarmStore::new();
        store.selected_slot_mut().set_time(hour, minute);
        store
    }

    #[test]
    fn browsing_line_hides_day_and_rounds() {
        let store = store_at(7, 5);
        let frame = format_frame(&store, &SettingsController::new(), true, 0);
        assert_eq!(frame.text(), "AL 1 705  ");
        assert_eq!(frame.pitch_segments(), 0);
        assert_eq!(frame.indicators(), Indicators::default());
    }

    #[test]
    fn editing_line_shows_everything() {
        let mut store = AlarmStore::new();
        for _ in 0..9 {
            store.advance_selection();
        }
        let slot = store.selected_slot_mut();
        slot.set_time(23, 59);
        slot.set_day(DaySelector::Workday);
        let frame = format_frame(&store, &editing(EditField::Day), true, 0);
        assert_eq!(frame.text(), "MF102359 6");
        assert_eq!(frame.pitch_segments(), 2);
    }

    #[test]
    fn twelve_hour_mode() {
        assert_eq!(display_hour(0, false), (12, false));
        assert_eq!(display_hour(11, false), (11, false));
        assert_eq!(display_hour(12, false), (12, true));
        assert_eq!(display_hour(15, false), (3, true));
        assert_eq!(display_hour(15, true), (15, false));

        let store = store_at(18, 30);
        let frame = format_frame(&store, &SettingsController::new(), false, 0);
        assert_eq!(frame.text(), "AL 1 630  ");
        assert!(frame.indicators().pm);
    }

    #[test]
    fn active_field_blinks_on_odd_ticks() {
        let store = store_at(9, 41);
        let expected = [
            (EditField::AlarmSelect, "ED   941 6"),
            (EditField::Day, "   1 941 6"),
            (EditField::Hour, "ED 1  41 6"),
            (EditField::Minute, "ED 1 9   6"),
            (EditField::Pitch, "ED 1 941 6"),
            (EditField::BeepRounds, "ED 1 941  "),
        ];
        for (field, text) in expected {
            let controller = editing(field);
            let steady = format_frame(&store, &controller, true, 2);
            assert_eq!(steady.text(), "ED 1 941 6", "{field:?}");
            let blinking = format_frame(&store, &controller, true, 3);
            assert_eq!(blinking.text(), text, "{field:?}");
        }
    }

    #[test]
    fn pitch_bar_blinks_with_the_pitch_field() {
        let mut store = AlarmStore::new();
        store.selected_slot_mut().increment_pitch();
        let on_pitch = editing(EditField::Pitch);
        assert_eq!(format_frame(&store, &on_pitch, true, 0).pitch_segments(), 3);
        assert_eq!(format_frame(&store, &on_pitch, true, 1).pitch_segments(), 0);

        let on_rounds = editing(EditField::BeepRounds);
        let frame = format_frame(&store, &on_rounds, true, 1);
        assert_eq!(frame.pitch_segments(), 3);
        assert_eq!(
            frame.lit_pitch_segments().collect::<Vec<_>>(),
            PITCH_SEGMENTS.to_vec()
        );
    }

    #[test]
    fn bell_follows_the_selected_slot() {
        let mut store = AlarmStore::new();
        store.selected_slot_mut().set_enabled(true);
        let controller = SettingsController::new();
        assert!(format_frame(&store, &controller, true, 0).indicators().bell);
        store.advance_selection();
        assert!(!format_frame(&store, &controller, true, 0).indicators().bell);
    }
}
