//! # Sound task
//! This module contains the task that plays notes on the piezo buzzer.
//!
//! The buzzer hangs on a PWM output. A note sets the PWM period to the note frequency at 50% duty, a rest
//! sets the duty to zero. A ringing alarm stops early when the stop signal arrives.
use alarm_face::tone::NoteStep;
use alarm_face::{AlarmTune, BuzzerNote};
use defmt::{Format, info};
use embassy_futures::select::{Either, select};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel, signal::Signal};
use embassy_time::{Duration, Timer};

/// The PWM clock divider, gives a counter clock that fits every note into the 16 bit counter
const PWM_DIVIDER: u8 = 16;

/// What the sound task should play
#[derive(Clone, Copy, Format)]
pub enum SoundCommand {
    /// A single note, used for the pitch preview
    Note(NoteStep),
    /// A firing alarm
    Alarm(AlarmTune),
}

/// Channel for the sound commands
static SOUND_CHANNEL: Channel<CriticalSectionRawMutex, SoundCommand, 8> = Channel::new();

/// Signal that stops a ringing alarm
static SOUND_STOP_SIGNAL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Queue a sound command, dropping it if the queue is full
pub fn send_sound_command(command: SoundCommand) {
    if SOUND_CHANNEL.try_send(command).is_err() {
        info!("Sound queue full, dropping {:?}", command);
    }
}

/// Stop a ringing alarm
pub fn signal_sound_stop() {
    SOUND_STOP_SIGNAL.signal(());
}

/// The buzzer on a PWM slice
struct Buzzer {
    /// The PWM output driving the buzzer
    pwm: Pwm<'static>,
}

impl Buzzer {
    /// Create a new `Buzzer`, silent
    fn new(pwm: Pwm<'static>) -> Self {
        let mut buzzer = Self { pwm };
        buzzer.silence();
        buzzer
    }

    /// Start a note, a rest silences the buzzer
    fn start(&mut self, note: BuzzerNote) {
        let Some(frequency) = note.frequency_hz() else {
            self.silence();
            return;
        };
        let counter_clock = clk_sys_freq() / u32::from(PWM_DIVIDER);
        let top = u16::try_from(counter_clock / frequency - 1).unwrap_or(u16::MAX);
        let mut config = Config::default();
        config.divider = PWM_DIVIDER.into();
        config.top = top;
        config.compare_a = top / 2;
        self.pwm.set_config(&config);
    }

    /// Stop any sound
    fn silence(&mut self) {
        let mut config = Config::default();
        config.compare_a = 0;
        self.pwm.set_config(&config);
    }

    /// Play a single step and return to silence
    async fn play_step(&mut self, (note, duration_ms): NoteStep) {
        self.start(note);
        Timer::after(Duration::from_millis(u64::from(duration_ms))).await;
        self.silence();
    }

    /// Play the rounds of an alarm, or until the stop signal arrives
    async fn play_alarm(&mut self, tune: AlarmTune) {
        SOUND_STOP_SIGNAL.reset();
        info!("Ringing {} rounds for {} ms", tune.get_rounds(), tune.duration_ms());
        let ringing = async {
            for step in tune.steps() {
                self.play_step(step).await;
            }
        };
        if let Either::Second(()) = select(ringing, SOUND_STOP_SIGNAL.wait()).await {
            info!("Alarm stopped");
        }
        self.silence();
    }
}

/// This task plays the queued notes and alarm tunes on the buzzer.
#[embassy_executor::task]
pub async fn sound_handler(pwm: Pwm<'static>) {
    info!("Sound task started");
    let mut buzzer = Buzzer::new(pwm);

    loop {
        match SOUND_CHANNEL.receive().await {
            SoundCommand::Note(step) => buzzer.play_step(step).await,
            SoundCommand::Alarm(tune) => buzzer.play_alarm(tune).await,
        }
    }
}
