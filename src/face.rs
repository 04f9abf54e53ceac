//! # Alarm face
//! Routes the events delivered by the host to the settings controller, the fire detector and the display.
//!
//! The host owns the face for its whole lifetime and calls into it from a single logical thread:
//! `setup` once, `activate`/`resign` when the face comes into view or leaves it, `handle_event` for every
//! event while visible, and `wants_background_task` once a minute whether visible or not.
use crate::alarm::AlarmStore;
use crate::config::FaceConfig;
use crate::event::{EventKind, FaceEvent};
use crate::fire::check_fire;
use crate::presentation::{FRAME_WIDTH, format_frame};
use crate::services::{Clock, Display, Host, Indicator};
use crate::settings::{Feedback, SettingsController, SettingsState};
use crate::tone::pitch_preview;

/// The alarm face: ten alarm slots, the settings cycle and the host facing glue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmFace {
    /// The alarm data
    store: AlarmStore,
    /// The settings cursor
    settings: SettingsController,
    /// Host provided configuration
    config: FaceConfig,
}

impl AlarmFace {
    /// Create the face with every slot at its defaults.
    pub const fn setup(config: FaceConfig) -> Self {
        Self {
            store: AlarmStore::new(),
            settings: SettingsController::new(),
            config,
        }
    }

    /// Get the alarm store
    pub const fn store(&self) -> &AlarmStore {
        &self.store
    }

    /// Get the alarm store for modification
    pub const fn store_mut(&mut self) -> &mut AlarmStore {
        &mut self.store
    }

    /// Get the settings controller
    pub const fn settings(&self) -> &SettingsController {
        &self.settings
    }

    /// Get the configuration
    pub const fn config(&self) -> &FaceConfig {
        &self.config
    }

    /// The face comes into view: clear what other faces left behind.
    pub fn activate<D: Display>(&mut self, display: &mut D) {
        display.show_text(FRAME_WIDTH - 2, "  ");
        display.clear_indicator(Indicator::Lap);
        display.set_colon();
    }

    /// The face leaves the view: stop editing and remember whether any alarm is armed.
    pub fn resign<H: Host>(&mut self, host: &mut H) {
        self.settings.cancel();
        let any_enabled = self.store.any_enabled();
        info!("alarm face resigning, alarms armed: {}", any_enabled);
        host.store_alarm_enabled(any_enabled);
        host.off();
    }

    /// The host's once a minute question whether the face needs to run its background task now.
    /// `true` means an alarm fires and a `BackgroundTask` event should follow.
    pub fn wants_background_task<C: Clock>(&mut self, clock: &C) -> bool {
        check_fire(&clock.now(), &mut self.store).is_some()
    }

    /// Handle one event. Returns `true` as the face is always fine with the device going to sleep.
    pub fn handle_event<H: Host>(&mut self, event: FaceEvent, host: &mut H) -> bool {
        match event.kind {
            EventKind::Activate | EventKind::Tick => self.draw(host, event.subsecond),
            EventKind::LightButtonUp => self.handle_light_button(host, event.subsecond),
            EventKind::LightLongPress => {
                if self.settings.is_editing() {
                    self.resume_browsing(host, event.subsecond);
                }
            }
            EventKind::AlarmButtonUp => {
                if let Feedback::PitchPreview(note) = self.settings.increment(&mut self.store) {
                    for (note, duration_ms) in pitch_preview(note) {
                        host.play_note(note, duration_ms);
                    }
                }
                self.draw(host, event.subsecond);
            }
            EventKind::AlarmLongPress => {
                if self.settings.is_editing() {
                    self.settings.long_increment(&mut self.store);
                } else {
                    self.settings.toggle(&mut self.store);
                }
                self.draw(host, event.subsecond);
            }
            EventKind::BackgroundTask => {
                if let Some(tune) = self.store.take_firing_tune() {
                    info!("playing alarm: {:?}", tune);
                    host.play_alarm(tune);
                } else {
                    warn!("background task without a firing alarm");
                }
            }
            EventKind::ModeButtonUp => host.next_face(),
            EventKind::Timeout => host.home_face(),
            EventKind::LightButtonDown | EventKind::LowEnergyUpdate => {}
        }
        true
    }

    /// Light button: enter the settings cycle while browsing, move to the next field while editing.
    fn handle_light_button<H: Host>(&mut self, host: &mut H, subsecond: u8) {
        if self.settings.is_editing() {
            if self.settings.advance() == SettingsState::Browsing {
                // we have done a full settings cycle, so resume to normal
                self.resume_browsing(host, subsecond);
            }
            return;
        }
        host.illuminate();
        self.settings.enter_edit();
        host.request_tick_frequency(self.config.edit_tick_hz);
        self.draw(host, subsecond);
    }

    /// Leave the settings cycle and slow the ticks down again
    fn resume_browsing<H: Host>(&mut self, host: &mut H, subsecond: u8) {
        self.settings.cancel();
        host.request_tick_frequency(self.config.browse_tick_hz);
        self.draw(host, subsecond);
    }

    /// Push the current frame to the display
    fn draw<D: Display>(&self, display: &mut D, subsecond: u8) {
        let frame = format_frame(
            &self.store,
            &self.settings,
            self.config.clock_mode_24h,
            subsecond,
        );
        display.show_text(0, frame.text());

        let indicators = frame.indicators();
        if !self.config.clock_mode_24h {
            set_indicator(display, Indicator::Pm, indicators.pm);
        }
        for (row, column) in frame.lit_pitch_segments() {
            display.set_pixel(row, column);
        }
        set_indicator(display, Indicator::Bell, indicators.bell);
    }
}

/// Light or clear an indicator
fn set_indicator<D: Display>(display: &mut D, indicator: Indicator, on: bool) {
    if on {
        display.set_indicator(indicator);
    } else {
        display.clear_indicator(indicator);
    }
}
