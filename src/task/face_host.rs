//! # Face host
//! Task that hosts the alarm face: it receives the events of the other tasks, feeds them to the face and
//! hands the face's requests on to the display, sound, LED and flash tasks.
//!
//! The device has two faces. The clock face shows the time and is the home face, the mode button switches
//! to the alarm face and back. The fire check runs once a minute whichever face is visible.
use core::fmt::Write;

use alarm_face::presentation::display_hour;
use alarm_face::services::{Clock, Display, Indicator, Led, Navigator, SettingsStore, Tone};
use alarm_face::{AlarmFace, AlarmTune, BuzzerNote, EventKind, FaceConfig, FaceEvent, SegmentFrame, Timestamp};
use defmt::{Format, info, warn};
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker, Timer};
use heapless::String;

use crate::task::{
    alarm_settings::send_flash_write_command,
    clock,
    display::signal_display_update,
    led::{LedCommand, signal_led},
    sound::{SoundCommand, send_sound_command, signal_sound_stop},
};

/// The alarm face returns to the clock face after this long without input
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(60);

/// Day labels of the clock face, Monday first
const WEEKDAY_LABELS: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

/// Events the face host reacts to
#[derive(PartialEq, Eq, Debug, Format, Clone, Copy)]
pub enum HostEvent {
    /// A button event
    Button(EventKind),
    /// The periodic tick, the data is the tick count within the current second
    Tick(u8),
    /// A new minute started
    Minute,
    /// The alarm enabled bit was read from flash
    AlarmEnabledRead(bool),
}

/// The capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 10;

/// Event channel of the face host
static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, HostEvent, EVENT_CHANNEL_CAPACITY> =
    Channel::new();

/// Signal for changing the tick frequency, the data is the frequency in Hz
static TICK_FREQUENCY_SIGNAL: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Sends an event to the face host
pub async fn send_event(event: HostEvent) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Receives the next event for the face host
async fn receive_event() -> HostEvent {
    EVENT_CHANNEL.receiver().receive().await
}

/// Where the face asked to go
#[derive(Clone, Copy, PartialEq, Eq, Format)]
enum Navigation {
    /// The next face, which is the clock face on this device
    Next,
    /// The home face
    Home,
}

/// The host side of one event: the current time as input, and everything the face asked for as output.
/// The requests are applied once the face is done with the event.
struct FirmwareHost<'a> {
    /// The time the event is handled at
    now: Timestamp,
    /// The frame being drawn into
    frame: &'a mut SegmentFrame,
    /// The alarm enabled bit as stored in flash
    stored_alarm_enabled: &'a mut Option<bool>,
    /// Whether the frame changed
    redraw: bool,
    /// Requested face switch
    navigation: Option<Navigation>,
    /// Requested tick frequency
    tick_hz: Option<u8>,
}

impl<'a> FirmwareHost<'a> {
    /// Create a new `FirmwareHost` for one event
    const fn new(
        now: Timestamp,
        frame: &'a mut SegmentFrame,
        stored_alarm_enabled: &'a mut Option<bool>,
    ) -> Self {
        Self {
            now,
            frame,
            stored_alarm_enabled,
            redraw: false,
            navigation: None,
            tick_hz: None,
        }
    }

    /// Hand the collected requests on to the other tasks
    fn apply(self) {
        if self.redraw {
            signal_display_update(self.frame.clone());
        }
        if let Some(hz) = self.tick_hz {
            TICK_FREQUENCY_SIGNAL.signal(hz);
        }
    }
}

impl Clock for FirmwareHost<'_> {
    fn now(&self) -> Timestamp {
        self.now
    }
}

impl Display for FirmwareHost<'_> {
    fn show_text(&mut self, position: usize, text: &str) {
        self.frame.show_text(position, text);
        self.redraw = true;
    }

    fn set_indicator(&mut self, indicator: Indicator) {
        self.frame.set_indicator(indicator);
        self.redraw = true;
    }

    fn clear_indicator(&mut self, indicator: Indicator) {
        self.frame.clear_indicator(indicator);
        self.redraw = true;
    }

    fn set_pixel(&mut self, row: u8, column: u8) {
        self.frame.set_pixel(row, column);
        self.redraw = true;
    }

    fn clear_pixel(&mut self, row: u8, column: u8) {
        self.frame.clear_pixel(row, column);
        self.redraw = true;
    }

    fn set_colon(&mut self) {
        self.frame.set_colon();
        self.redraw = true;
    }
}

impl Tone for FirmwareHost<'_> {
    fn play_note(&mut self, note: BuzzerNote, duration_ms: u16) {
        send_sound_command(SoundCommand::Note((note, duration_ms)));
    }

    fn play_alarm(&mut self, tune: AlarmTune) {
        send_sound_command(SoundCommand::Alarm(tune));
    }
}

impl Led for FirmwareHost<'_> {
    fn illuminate(&mut self) {
        signal_led(LedCommand::Illuminate);
    }

    fn off(&mut self) {
        signal_led(LedCommand::Off);
    }
}

impl SettingsStore for FirmwareHost<'_> {
    fn store_alarm_enabled(&mut self, enabled: bool) {
        *self.stored_alarm_enabled = Some(enabled);
        send_flash_write_command(enabled);
    }

    fn load_alarm_enabled(&self) -> Option<bool> {
        *self.stored_alarm_enabled
    }
}

impl Navigator for FirmwareHost<'_> {
    fn next_face(&mut self) {
        self.navigation = Some(Navigation::Next);
    }

    fn home_face(&mut self) {
        self.navigation = Some(Navigation::Home);
    }

    fn request_tick_frequency(&mut self, hz: u8) {
        self.tick_hz = Some(hz);
    }
}

/// Draw the clock face: weekday, day of month, time and seconds, with the bell if an alarm is armed
fn draw_clock_face(host: &mut FirmwareHost<'_>, clock_mode_24h: bool) {
    let now = host.now;
    let (hour, pm) = display_hour(now.hour, clock_mode_24h);
    let mut line: String<10> = String::new();
    // every value is range bound, the line always fits
    let _ = write!(
        line,
        "{}{:>2}{:>2}{:02}{:02}",
        WEEKDAY_LABELS[usize::from(now.weekday() % 7)],
        now.day,
        hour,
        now.minute,
        now.second
    );
    host.show_text(0, &line);
    host.set_colon();
    if pm {
        host.set_indicator(Indicator::Pm);
    } else {
        host.clear_indicator(Indicator::Pm);
    }
    if host.load_alarm_enabled() == Some(true) {
        host.set_indicator(Indicator::Bell);
    } else {
        host.clear_indicator(Indicator::Bell);
    }
}

/// State of the face host task
struct FaceHost {
    /// The alarm face
    face: AlarmFace,
    /// Whether the alarm face is the visible face
    face_visible: bool,
    /// The frame shown on the display
    frame: SegmentFrame,
    /// The alarm enabled bit as stored in flash
    stored_alarm_enabled: Option<bool>,
    /// When the last button event arrived
    last_input: Instant,
}

impl FaceHost {
    /// Create a new `FaceHost` showing the clock face
    fn new(config: FaceConfig) -> Self {
        Self {
            face: AlarmFace::setup(config),
            face_visible: false,
            frame: SegmentFrame::new(),
            stored_alarm_enabled: None,
            last_input: Instant::now(),
        }
    }

    /// Handles a single event
    async fn handle_event(&mut self, event: HostEvent) {
        let now = clock::now().await;
        let clock_mode_24h = self.face.config().clock_mode_24h;
        let mut host = FirmwareHost::new(now, &mut self.frame, &mut self.stored_alarm_enabled);

        match event {
            HostEvent::Button(kind) => {
                self.last_input = Instant::now();
                // any button silences a ringing alarm
                signal_sound_stop();
                if self.face_visible {
                    self.face.handle_event(FaceEvent::from(kind), &mut host);
                } else {
                    match kind {
                        EventKind::ModeButtonUp => {
                            info!("Switching to the alarm face");
                            self.face.activate(&mut host);
                            self.face.handle_event(EventKind::Activate.into(), &mut host);
                            self.face_visible = true;
                        }
                        EventKind::LightButtonUp => host.illuminate(),
                        _ => {}
                    }
                }
            }
            HostEvent::Tick(subsecond) => {
                if !self.face_visible {
                    draw_clock_face(&mut host, clock_mode_24h);
                } else if self.last_input.elapsed() > INACTIVITY_TIMEOUT {
                    self.face.handle_event(EventKind::Timeout.into(), &mut host);
                } else {
                    self.face
                        .handle_event(FaceEvent::new(EventKind::Tick, subsecond), &mut host);
                }
            }
            HostEvent::Minute => {
                if self.face.wants_background_task(&host) {
                    self.face
                        .handle_event(EventKind::BackgroundTask.into(), &mut host);
                }
            }
            HostEvent::AlarmEnabledRead(enabled) => {
                info!("Alarm enabled bit read from flash: {}", enabled);
                *host.stored_alarm_enabled = Some(enabled);
            }
        }

        if let Some(navigation) = host.navigation.take() {
            info!("Leaving the alarm face: {:?}", navigation);
            self.face.resign(&mut host);
            self.face_visible = false;
            host.request_tick_frequency(self.face.config().browse_tick_hz);
            draw_clock_face(&mut host, clock_mode_24h);
        }
        host.apply();
    }
}

/// This task hosts the alarm face. It receives the events from the other tasks and reacts to them.
#[embassy_executor::task]
pub async fn face_host(config: FaceConfig) {
    info!("Face host task started");
    let mut face_host = FaceHost::new(config);
    TICK_FREQUENCY_SIGNAL.signal(config.browse_tick_hz);

    loop {
        let event = receive_event().await;
        face_host.handle_event(event).await;
    }
}

/// This task sends the periodic ticks at the frequency the face asked for.
#[embassy_executor::task]
pub async fn ticker() {
    info!("Ticker task started");
    let mut hz = TICK_FREQUENCY_SIGNAL.wait().await.max(1);
    let mut ticker = Ticker::every(Duration::from_hz(u64::from(hz)));
    let mut subsecond: u8 = 0;

    loop {
        match select(ticker.next(), TICK_FREQUENCY_SIGNAL.wait()).await {
            Either::First(()) => {
                send_event(HostEvent::Tick(subsecond)).await;
                subsecond = (subsecond + 1) % hz;
            }
            Either::Second(new_hz) => {
                if new_hz != hz {
                    info!("Tick frequency now {} Hz", new_hz);
                    hz = new_hz.max(1);
                    ticker = Ticker::every(Duration::from_hz(u64::from(hz)));
                    subsecond = 0;
                }
            }
        }
    }
}

/// This task wakes the face host at the start of every minute for the fire check.
#[embassy_executor::task]
pub async fn minute_scheduler() {
    info!("Minute scheduler task started");
    loop {
        let now = clock::now().await;
        let until_next_minute = 60 - u64::from(now.second.min(59));
        Timer::after(Duration::from_secs(until_next_minute)).await;
        if EVENT_CHANNEL.try_send(HostEvent::Minute).is_err() {
            warn!("Event channel full, sending minute event later");
            send_event(HostEvent::Minute).await;
        }
    }
}
