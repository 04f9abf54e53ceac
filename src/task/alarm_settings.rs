//! # Alarm Settings
//! This module contains the functionality to persist the alarm enabled bit in the flash memory.
//!
//! The alarm slots themselves live in RAM only. The bit survives a reset so the clock face can show the bell
//! right after boot.
use crate::task::face_host::{HostEvent, send_event};
use core::ops::Range;
use defmt::{Debug2Format, info, warn};
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Channel for flash write commands
static FLASH_CHANNEL: Channel<CriticalSectionRawMutex, bool, 1> = Channel::new();

/// Sends the alarm enabled bit to be written to flash, a pending write is replaced
pub fn send_flash_write_command(enabled: bool) {
    FLASH_CHANNEL.clear();
    if FLASH_CHANNEL.try_send(enabled).is_err() {
        warn!("Flash write command dropped");
    }
}

/// Waits for the next flash write command
async fn wait_for_flash_write_command() -> bool {
    FLASH_CHANNEL.receiver().receive().await
}

/// The size of the flash memory in bytes.
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// The key of the alarm enabled bit
const ALARM_ENABLED_KEY: u8 = 0;

/// This struct is used to persist the alarm enabled bit in the flash memory.
pub struct PersistedAlarmSettings<'a> {
    /// The flash peripheral used to read and write the bit.
    flash: Flash<'a, FLASH, Async, { FLASH_SIZE }>,
    /// The range of the flash memory used to store the bit.
    flash_range: Range<u32>,
    /// A buffer used for reading and writing data to the flash memory.
    data_buffer: [u8; 128],
    /// The value last read or written, to skip writes that change nothing
    last_value: Option<bool>,
}

impl<'a> PersistedAlarmSettings<'a> {
    /// Create a new `PersistedAlarmSettings` on the last flash sectors before the end of the flash.
    pub const fn new(flash: Flash<'a, FLASH, Async, { FLASH_SIZE }>) -> Self {
        Self {
            flash_range: 0x1F_9000..0x1FC_000,
            data_buffer: [0; 128],
            flash,
            last_value: None,
        }
    }

    /// Read the alarm enabled bit, `None` if it was never written or cannot be read.
    pub async fn read_alarm_enabled_from_flash(&mut self) -> Option<bool> {
        match fetch_item::<u8, u8, _>(
            &mut self.flash,
            self.flash_range.clone(),
            &mut NoCache::new(),
            &mut self.data_buffer,
            &ALARM_ENABLED_KEY,
        )
        .await
        {
            Ok(Some(value)) => {
                info!("Read alarm enabled bit: {}", value);
                self.last_value = Some(value != 0);
                self.last_value
            }
            Ok(None) => {
                info!("No alarm enabled bit found in flash");
                None
            }
            Err(e) => {
                warn!("Failed to fetch alarm enabled bit: {:?}", Debug2Format(&e));
                None
            }
        }
    }

    /// Write the alarm enabled bit, unless flash already holds that value.
    pub async fn write_alarm_enabled_to_flash(&mut self, enabled: bool) {
        if self.last_value == Some(enabled) {
            return;
        }
        match store_item::<u8, u8, _>(
            &mut self.flash,
            self.flash_range.clone(),
            &mut NoCache::new(),
            &mut self.data_buffer,
            &ALARM_ENABLED_KEY,
            &u8::from(enabled),
        )
        .await
        {
            Ok(()) => {
                info!("Alarm enabled bit {} stored successfully", enabled);
                self.last_value = Some(enabled);
            }
            Err(e) => {
                warn!(
                    "Failed to store alarm enabled bit {}: {:?}",
                    enabled,
                    Debug2Format(&e)
                );
            }
        }
    }
}

/// This task reads the alarm enabled bit from the flash memory on startup and sends it to the face host.
/// After that, it waits for commands to update it.
#[embassy_executor::task]
pub async fn alarm_settings_handler(flash: Flash<'static, FLASH, Async, { FLASH_SIZE }>) {
    let mut persisted_alarm_settings = PersistedAlarmSettings::new(flash);

    if let Some(enabled) = persisted_alarm_settings
        .read_alarm_enabled_from_flash()
        .await
    {
        send_event(HostEvent::AlarmEnabledRead(enabled)).await;
    }

    loop {
        let enabled = wait_for_flash_write_command().await;
        info!("Received alarm enabled write command: {}", enabled);
        persisted_alarm_settings
            .write_alarm_enabled_to_flash(enabled)
            .await;
    }
}
