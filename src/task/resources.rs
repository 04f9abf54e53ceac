//! # Resources
//! Pin assignment of the board and the interrupt bindings shared by the tasks.
//!
//! | Function        | Pin     |
//! |-----------------|---------|
//! | light button    | GPIO 20 |
//! | alarm button    | GPIO 21 |
//! | mode button     | GPIO 22 |
//! | backlight LED   | GPIO 26 |
//! | buzzer (PWM 0A) | GPIO 16 |
//! | display SDA     | GPIO 12 |
//! | display SCL     | GPIO 13 |
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::I2C0;

// bind the interrupts, on a global scope
bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
