//! # Host services
//! The services the alarm face consumes from its host. The face never talks to hardware directly, the
//! firmware (or a test double) implements these traits.
use crate::tone::{AlarmTune, BuzzerNote};
use crate::utility::datetime::Timestamp;

/// Indicator segments of the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// The bell, an alarm is armed
    Bell,
    /// Afternoon in 12 hour mode
    Pm,
    /// The lap indicator, other faces use it and the alarm face clears it
    Lap,
}

/// Wall clock access
pub trait Clock {
    /// The current date and time
    fn now(&self) -> Timestamp;
}

/// The segment display
pub trait Display {
    /// Write text starting at the given character position
    fn show_text(&mut self, position: usize, text: &str);
    /// Light an indicator
    fn set_indicator(&mut self, indicator: Indicator);
    /// Turn an indicator off
    fn clear_indicator(&mut self, indicator: Indicator);
    /// Light a single segment
    fn set_pixel(&mut self, row: u8, column: u8);
    /// Turn a single segment off
    fn clear_pixel(&mut self, row: u8, column: u8);
    /// Light the colon between hours and minutes
    fn set_colon(&mut self);
}

/// The buzzer
pub trait Tone {
    /// Play a single note for the given time. A rest is silence of that length.
    fn play_note(&mut self, note: BuzzerNote, duration_ms: u16);
    /// Play the tune of a firing alarm
    fn play_alarm(&mut self, tune: AlarmTune);
}

/// The backlight LED
pub trait Led {
    /// Switch the LED on for the host's illumination period
    fn illuminate(&mut self);
    /// Switch the LED off
    fn off(&mut self);
}

/// Persistent settings of the host. The face only keeps a single bit there.
pub trait SettingsStore {
    /// Remember whether any alarm is armed, the host uses this to decide whether to wake up for alarm checks
    fn store_alarm_enabled(&mut self, enabled: bool);
    /// The remembered bit, `None` if nothing was stored yet
    fn load_alarm_enabled(&self) -> Option<bool>;
}

/// Face switching and tick control of the host
pub trait Navigator {
    /// Switch to the next face
    fn next_face(&mut self);
    /// Switch to the home face
    fn home_face(&mut self);
    /// Ask for periodic ticks at the given frequency in Hz
    fn request_tick_frequency(&mut self, hz: u8);
}

/// Everything the alarm face needs from its host
pub trait Host: Clock + Display + Tone + Led + SettingsStore + Navigator {}

impl<T> Host for T where T: Clock + Display + Tone + Led + SettingsStore + Navigator {}
