//! # Segment frame rendering
//! The firmware has no segment LCD, it shows the face on a 128x64 OLED. [`SegmentFrame`] takes the
//! display calls of the face like the LCD driver would and draws the result with `embedded-graphics`.
//!
//! ```text
//!  BELL PM                  <- indicators, small font
//!  E D  1  6:3 0  6         <- ten characters, colon between hour and minute
//!  ##  ##  ##               <- lit segments, used for the pitch bar
//! ```
use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X13, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::Vec;

use crate::presentation::FRAME_WIDTH;
use crate::services::{Display, Indicator};

/// Left edge of the character line
const TEXT_LEFT: i32 = 2;
/// Top edge of the character line
const TEXT_TOP: i32 = 20;
/// Horizontal distance of two characters
const CHARACTER_PITCH: i32 = 12;
/// The colon sits after this character position
const COLON_AFTER: usize = 5;
/// Top edge of the lit segments
const PIXEL_TOP: i32 = 48;
/// Maximum number of single segments lit at the same time
const MAX_PIXELS: usize = 16;

/// What the face has put on the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFrame {
    /// The characters, ASCII only
    text: [u8; FRAME_WIDTH],
    /// The bell indicator
    bell: bool,
    /// The PM indicator
    pm: bool,
    /// The lap indicator
    lap: bool,
    /// The colon
    colon: bool,
    /// Lit single segments as (row, column)
    pixels: Vec<(u8, u8), MAX_PIXELS>,
}

impl Default for SegmentFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentFrame {
    /// An empty frame
    pub const fn new() -> Self {
        Self {
            text: [b' '; FRAME_WIDTH],
            bell: false,
            pm: false,
            lap: false,
            colon: false,
            pixels: Vec::new(),
        }
    }

    /// The character line
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.text).unwrap_or_default()
    }

    /// Whether an indicator is lit
    pub const fn indicator(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Bell => self.bell,
            Indicator::Pm => self.pm,
            Indicator::Lap => self.lap,
        }
    }

    /// Whether the colon is lit
    pub const fn colon(&self) -> bool {
        self.colon
    }

    /// The lit single segments
    pub fn pixels(&self) -> &[(u8, u8)] {
        &self.pixels
    }

    /// Draw the frame. The target is not cleared first.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let small = MonoTextStyle::new(&FONT_6X13, BinaryColor::On);
        if self.bell {
            Text::with_baseline("BELL", Point::new(0, 0), small, Baseline::Top).draw(target)?;
        }
        if self.pm {
            Text::with_baseline("PM", Point::new(30, 0), small, Baseline::Top).draw(target)?;
        }
        if self.lap {
            Text::with_baseline("LAP", Point::new(104, 0), small, Baseline::Top).draw(target)?;
        }

        let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let mut x = TEXT_LEFT;
        for character in self.text.chunks(1) {
            let character = core::str::from_utf8(character).unwrap_or(" ");
            Text::with_baseline(character, Point::new(x, TEXT_TOP), large, Baseline::Top)
                .draw(target)?;
            x += CHARACTER_PITCH;
        }

        let fill = PrimitiveStyle::with_fill(BinaryColor::On);
        if self.colon {
            let colon_x = TEXT_LEFT + COLON_AFTER as i32 * CHARACTER_PITCH + 10;
            for dot_y in [TEXT_TOP + 5, TEXT_TOP + 13] {
                Rectangle::new(Point::new(colon_x, dot_y), Size::new(2, 2))
                    .into_styled(fill)
                    .draw(target)?;
            }
        }
        for (row, column) in &self.pixels {
            Rectangle::new(
                Point::new(
                    TEXT_LEFT + i32::from(*row) * CHARACTER_PITCH,
                    PIXEL_TOP + i32::from(*column) * 2,
                ),
                Size::new(10, 4),
            )
            .into_styled(fill)
            .draw(target)?;
        }
        Ok(())
    }
}

impl Display for SegmentFrame {
    /// Writing text redraws the digits, which turns off any single segment lit before.
    fn show_text(&mut self, position: usize, text: &str) {
        for (target, byte) in self.text.iter_mut().skip(position).zip(text.bytes()) {
            *target = if byte.is_ascii() { byte } else { b'?' };
        }
        self.pixels.clear();
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        match indicator {
            Indicator::Bell => self.bell = true,
            Indicator::Pm => self.pm = true,
            Indicator::Lap => self.lap = true,
        }
    }

    fn clear_indicator(&mut self, indicator: Indicator) {
        match indicator {
            Indicator::Bell => self.bell = false,
            Indicator::Pm => self.pm = false,
            Indicator::Lap => self.lap = false,
        }
    }

    fn set_pixel(&mut self, row: u8, column: u8) {
        if !self.pixels.contains(&(row, column)) && self.pixels.push((row, column)).is_err() {
            warn!("too many lit segments, dropping ({}, {})", row, column);
        }
    }

    fn clear_pixel(&mut self, row: u8, column: u8) {
        self.pixels.retain(|pixel| *pixel != (row, column));
    }

    fn set_colon(&mut self) {
        self.colon = true;
    }
}
