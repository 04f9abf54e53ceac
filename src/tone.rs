//! # Tones
//! The buzzer notes used by the alarm face and the note sequences played through the tone service:
//! the short preview when the pitch of an alarm is changed, and the beep rounds of a firing alarm.

/// A note the buzzer can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerNote {
    /// Silence
    Rest,
    /// B6, the low alarm pitch
    B6,
    /// C8, the high alarm pitch
    C8,
    /// A8, the highest alarm pitch
    A8,
}

/// The alarm notes, indexed by the pitch level of a slot.
pub const ALARM_NOTES: [BuzzerNote; 3] = [BuzzerNote::B6, BuzzerNote::C8, BuzzerNote::A8];

impl BuzzerNote {
    /// The note for a slot pitch level. Levels past the table wrap around.
    pub const fn for_pitch(pitch: u8) -> Self {
        ALARM_NOTES[pitch as usize % ALARM_NOTES.len()]
    }

    /// Frequency of the note in Hz, `None` for a rest.
    pub const fn frequency_hz(self) -> Option<u32> {
        match self {
            Self::Rest => None,
            Self::B6 => Some(1976),
            Self::C8 => Some(4186),
            Self::A8 => Some(7040),
        }
    }
}

/// One step of a note sequence: the note and how long it is held, in milliseconds.
pub type NoteStep = (BuzzerNote, u16);

/// Played when the pitch of an alarm changes: note, short rest, slightly longer note.
pub const fn pitch_preview(note: BuzzerNote) -> [NoteStep; 3] {
    [(note, 50), (BuzzerNote::Rest, 50), (note, 75)]
}

/// Length of the beep in one alarm round.
pub const ALARM_BEEP_MS: u16 = 375;
/// Length of the silence after the beep in one alarm round.
pub const ALARM_PAUSE_MS: u16 = 625;
/// Upper bound of rounds the host will play for a single alarm.
pub const MAX_ALARM_ROUNDS: u8 = 20;

/// The beep pattern of a firing alarm: a number of rounds of one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTune {
    /// Number of rounds to play, 1-20
    rounds: u8,
    /// The note of the beeps
    note: BuzzerNote,
}

impl AlarmTune {
    /// Create a new `AlarmTune`. The number of rounds is clamped to `1..=MAX_ALARM_ROUNDS`.
    pub fn new(rounds: u8, note: BuzzerNote) -> Self {
        Self {
            rounds: rounds.clamp(1, MAX_ALARM_ROUNDS),
            note,
        }
    }

    /// Get the number of rounds
    pub const fn get_rounds(&self) -> u8 {
        self.rounds
    }

    /// Get the note
    pub const fn get_note(&self) -> BuzzerNote {
        self.note
    }

    /// Total play time of the tune in milliseconds.
    pub const fn duration_ms(&self) -> u32 {
        self.rounds as u32 * (ALARM_BEEP_MS as u32 + ALARM_PAUSE_MS as u32)
    }

    /// The steps of the tune, a beep and a pause per round.
    pub fn steps(&self) -> impl Iterator<Item = NoteStep> + '_ {
        (0..self.rounds).flat_map(move |_| [(self.note, ALARM_BEEP_MS), (BuzzerNote::Rest, ALARM_PAUSE_MS)])
    }
}
