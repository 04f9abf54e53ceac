//! # Button Tasks
//! This module contains the tasks for the buttons. Each button has its own task.
//!
//! A button reports a release before one second as a short press, holding it longer reports a long press
//! once. The light button also reports going down, the face host uses that to stop a ringing alarm early.
use crate::task::face_host::{HostEvent, send_event};
use alarm_face::EventKind;
use defmt::{Format, info};
use embassy_rp::gpio::{Input, Level};
use embassy_time::{Duration, Instant, Timer, with_deadline};

/// Holding a button this long turns a press into a long press
const LONG_PRESS_DURATION: Duration = Duration::from_secs(1);

/// Debounces a button and turns its level changes into face events
pub struct ButtonManager<'a> {
    /// The input pin for the button
    input: Input<'a>,
    /// The debounce duration
    debounce_duration: Duration,
    /// The button being managed
    button: Button,
}

/// The buttons of the system
#[derive(Debug, Format, Eq, PartialEq, Clone, Copy)]
pub enum Button {
    /// The light button, enters and steps through the settings
    Light,
    /// The alarm button, changes values and toggles alarms
    Alarm,
    /// The mode button, switches between the clock and the alarm face
    Mode,
}

impl Button {
    /// The event sent when the button goes down, if any
    const fn down_event(self) -> Option<EventKind> {
        match self {
            Self::Light => Some(EventKind::LightButtonDown),
            Self::Alarm | Self::Mode => None,
        }
    }

    /// The event sent when the button is released after a short press
    const fn up_event(self) -> EventKind {
        match self {
            Self::Light => EventKind::LightButtonUp,
            Self::Alarm => EventKind::AlarmButtonUp,
            Self::Mode => EventKind::ModeButtonUp,
        }
    }

    /// The event sent when the button is held, the mode button has none
    const fn long_press_event(self) -> Option<EventKind> {
        match self {
            Self::Light => Some(EventKind::LightLongPress),
            Self::Alarm => Some(EventKind::AlarmLongPress),
            Self::Mode => None,
        }
    }
}

impl<'a> ButtonManager<'a> {
    /// Create a new `ButtonManager`
    pub const fn new(input: Input<'a>, button: Button) -> Self {
        Self {
            input,
            debounce_duration: Duration::from_millis(80), // hardcoding, all buttons have the same debounce duration
            button,
        }
    }

    /// Handle the button press event. This function is an infinite loop that waits for a debounced button press event, then determines if the button was pressed or held.
    /// The button is normally high, and when pressed, it goes low.
    pub async fn handle_button_press(&mut self) {
        'mainloop: loop {
            let init_level = self.debounce().await;
            if init_level != Level::Low {
                continue 'mainloop;
            }
            if let Some(event) = self.button.down_event() {
                send_event(HostEvent::Button(event)).await;
            }

            // we wait for the button to be released, depending on how fast that happens, we have a short or a long press
            let level_result =
                with_deadline(Instant::now() + LONG_PRESS_DURATION, self.debounce()).await;

            if let Ok(level) = level_result {
                if level == Level::High {
                    send_event(HostEvent::Button(self.button.up_event())).await;
                }
                continue 'mainloop;
            }

            // button held for > 1s, report it once and wait for the release
            if let Some(event) = self.button.long_press_event() {
                send_event(HostEvent::Button(event)).await;
            }
            while self.debounce().await != Level::High {}
        }
    }

    /// Debounce the button press by waiting for the button to be stable for a given duration. We determine the input level, then await any edge,
    /// then wait for the debounce duration, then check if the input level has changed. If it has, we break the loop and return the new level.
    pub async fn debounce(&mut self) -> Level {
        loop {
            let l1 = self.input.get_level();

            self.input.wait_for_any_edge().await;

            Timer::after(self.debounce_duration).await;

            let l2 = self.input.get_level();
            if l1 != l2 {
                break l2;
            }
        }
    }
}

#[embassy_executor::task(pool_size = 3)]
pub async fn button_handler(input: Input<'static>, button: Button) {
    let mut btn = ButtonManager::new(input, button);
    info!("{} task started", btn.button);
    btn.handle_button_press().await;
}
