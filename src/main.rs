//! # Alarm face firmware
//! Hosts the alarm face on a Raspberry Pi Pico: three buttons, a backlight LED, a piezo buzzer and an SSD1306 OLED.
// we are in an environment with constrained resources, so we do not use the standard library and we define a different entry point.
#![no_std]
#![no_main]

use crate::task::alarm_settings::alarm_settings_handler;
use crate::task::buttons::{Button, button_handler};
use crate::task::clock::init_rtc;
use crate::task::display::display;
use crate::task::face_host::{face_host, minute_scheduler, ticker};
use crate::task::led::led_handler;
use crate::task::sound::sound_handler;
use alarm_face::FaceConfig;
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

mod task;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Program start");

    // Initialize the peripherals for the RP2040
    let p = embassy_rp::init(Default::default());

    let config = FaceConfig::embedded_or_default();
    info!("Face configuration: {:?}", config);

    // the RTC must be running before anything asks for the time
    init_rtc(p.RTC).await;

    // the face host and its schedulers
    spawner.spawn(unwrap!(face_host(config)));
    spawner.spawn(unwrap!(ticker()));
    spawner.spawn(unwrap!(minute_scheduler()));

    // buttons
    let light_button = Input::new(p.PIN_20, Pull::Up);
    spawner.spawn(unwrap!(button_handler(light_button, Button::Light)));
    let alarm_button = Input::new(p.PIN_21, Pull::Up);
    spawner.spawn(unwrap!(button_handler(alarm_button, Button::Alarm)));
    let mode_button = Input::new(p.PIN_22, Pull::Up);
    spawner.spawn(unwrap!(button_handler(mode_button, Button::Mode)));

    // backlight
    let led = Output::new(p.PIN_26, Level::Low);
    spawner.spawn(unwrap!(led_handler(led)));

    // buzzer
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    spawner.spawn(unwrap!(sound_handler(pwm)));

    // display
    spawner.spawn(unwrap!(display(p.I2C0, p.PIN_13, p.PIN_12)));

    // persistence
    let flash = Flash::new(p.FLASH, p.DMA_CH0);
    spawner.spawn(unwrap!(alarm_settings_handler(flash)));
}
