//! # Alarm face
//! A ten slot alarm face for a two button wearable.
//!
//! Each slot holds a time, a day rule, a pitch level, a beep round count and an enabled flag. The light button
//! walks a settings cursor over the fields of the selected slot, the alarm button changes them. Once a minute
//! the host asks whether an alarm fires and, if so, plays its tune.
//!
//! The crate is hardware agnostic: everything the face needs from its host goes through the traits in
//! [`services`]. The `firmware` feature builds an RP2040 binary that hosts the face on an OLED display with a
//! PWM buzzer and three buttons.
#![cfg_attr(not(test), no_std)]

// must come first, the log macros are used by the modules below
mod fmt;

pub mod alarm;
pub mod config;
pub mod event;
pub mod face;
pub mod fire;
pub mod presentation;
pub mod render;
pub mod services;
pub mod settings;
pub mod tone;
pub mod utility;

pub use alarm::{AlarmSlot, AlarmStore, DaySelector, SlotIndex};
pub use config::{ConfigError, FaceConfig};
pub use event::{EventKind, FaceEvent};
pub use face::AlarmFace;
pub use render::SegmentFrame;
pub use services::Host;
pub use tone::{AlarmTune, BuzzerNote};
pub use utility::datetime::Timestamp;
