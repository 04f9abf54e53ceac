//! # Backlight LED task
//! This module contains the task that controls the backlight LED.
//!
//! Illuminating switches the LED on for a few seconds, a new illumination restarts the period.
use defmt::info;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::Output;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Timer};

/// How long the LED stays on after an illumination
const ILLUMINATION_PERIOD: Duration = Duration::from_secs(3);

/// Command for controlling the LED
#[derive(Clone, Copy, defmt::Format)]
pub enum LedCommand {
    /// Turn the LED on for the illumination period
    Illuminate,
    /// Turn the LED off
    Off,
}

/// Signal for controlling the LED
static LED_SIGNAL: Signal<CriticalSectionRawMutex, LedCommand> = Signal::new();

/// Signals the LED task with a command
pub fn signal_led(command: LedCommand) {
    LED_SIGNAL.signal(command);
}

/// Waits for the next LED command
async fn wait_for_led_command() -> LedCommand {
    LED_SIGNAL.wait().await
}

#[embassy_executor::task]
pub async fn led_handler(mut control_pin: Output<'static>) {
    info!("LED task started");
    control_pin.set_low();

    let mut command = wait_for_led_command().await;
    loop {
        match command {
            LedCommand::Off => {
                control_pin.set_low();
                command = wait_for_led_command().await;
            }
            LedCommand::Illuminate => {
                control_pin.set_high();
                // wait for either the period to pass or a new command, which may restart the period
                command = match select(Timer::after(ILLUMINATION_PERIOD), wait_for_led_command()).await {
                    Either::First(()) => LedCommand::Off,
                    Either::Second(new_command) => new_command,
                };
            }
        }
    }
}
