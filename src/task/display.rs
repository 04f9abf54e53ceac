//! # Display task
//! This module contains the task that shows the segment frame on the OLED display.
//!
//! The face host publishes a new frame whenever something changed, the task draws and flushes it.
use crate::task::resources::Irqs;
use alarm_face::SegmentFrame;
use defmt::{Debug2Format, error, info, warn};
use embassy_rp::Peri;
use embassy_rp::i2c::{Config, I2c};
use embassy_rp::peripherals::{I2C0, PIN_12, PIN_13};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use ssd1306::{I2CDisplayInterface, Ssd1306Async, prelude::*};

/// Signal carrying the latest frame, an unread frame is replaced by a newer one
static DISPLAY_SIGNAL: Signal<CriticalSectionRawMutex, SegmentFrame> = Signal::new();

/// Publish a frame to the display
pub fn signal_display_update(frame: SegmentFrame) {
    DISPLAY_SIGNAL.signal(frame);
}

#[embassy_executor::task]
pub async fn display(i2c0: Peri<'static, I2C0>, scl: Peri<'static, PIN_13>, sda: Peri<'static, PIN_12>) {
    info!("Display task started");

    let mut config = Config::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(i2c0, scl, sda, Irqs, config);

    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {}", Debug2Format(&e));
        return;
    }
    if let Err(e) = display.set_brightness(Brightness::DIM).await {
        warn!("Failed to dim display: {}", Debug2Format(&e));
    }

    loop {
        let frame = DISPLAY_SIGNAL.wait().await;

        // prepare the display, note that nothing is sent to the display before flush()
        display.clear_buffer();
        if let Err(e) = frame.draw(&mut display) {
            warn!("Failed to draw frame: {}", Debug2Format(&e));
            continue;
        }
        if let Err(e) = display.flush().await {
            warn!("Failed to flush display: {}", Debug2Format(&e));
        }
    }
}

