//! Tasks that make up the firmware as well as the resources they use.
pub mod alarm_settings;
pub mod buttons;
pub mod clock;
pub mod display;
pub mod face_host;
pub mod led;
pub mod resources;
pub mod sound;
