//! # Date and time
//! The wall clock reading handed to the face by the clock service, and the day of week calculation
//! the fire detector needs for weekday bound alarms.

/// Offsets of the month starts for Sakamoto's day of week method.
const MONTH_OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

/// A wall clock reading as delivered by the RTC.
///
/// The year is the full Gregorian year, `month` and `day` start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    /// The year, e.g. 2024
    pub year: u16,
    /// The month, 1-12
    pub month: u8,
    /// The day of the month, 1-31
    pub day: u8,
    /// The hour, 0-23
    pub hour: u8,
    /// The minute, 0-59
    pub minute: u8,
    /// The second, 0-59
    pub second: u8,
}

impl Timestamp {
    /// Create a new `Timestamp` at the start of the given minute.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second: 0,
        }
    }

    /// Returns the same timestamp with the seconds set.
    #[must_use]
    pub const fn with_second(mut self, second: u8) -> Self {
        self.second = second;
        self
    }

    /// The day of week of this timestamp's date, Monday is 0 and Sunday is 6.
    pub const fn weekday(&self) -> u8 {
        weekday_index(self.year, self.month, self.day)
    }
}

/// Day of week of a Gregorian date, Monday is 0 and Sunday is 6.
///
/// Sakamoto's method, which on its own yields Sunday as 0, shifted by six days.
/// Valid for every year from 1 on; month and day are expected to be in range.
pub const fn weekday_index(year: u16, month: u8, day: u8) -> u8 {
    let month_index = if month >= 1 && month <= 12 {
        month as usize - 1
    } else {
        0
    };
    // January and February count towards the previous year
    let y = if month < 3 {
        year.saturating_sub(1) as u32
    } else {
        year as u32
    };
    let sunday_based = (y + y / 4 - y / 100 + y / 400 + MONTH_OFFSETS[month_index] as u32 + day as u32) % 7;
    ((sunday_based + 6) % 7) as u8
}
