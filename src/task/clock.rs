//! # Clock
//! The RTC of the RP2040 behind a mutex, and its conversion to the timestamps the alarm face works with.
//!
//! There is no time sync, the RTC is seeded at boot and set through the debug probe if needed.
use alarm_face::Timestamp;
use defmt::{Debug2Format, info, warn};
use embassy_rp::Peri;
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Type alias for the RTC mutex.
type RtcType = Mutex<CriticalSectionRawMutex, Option<Rtc<'static, RTC>>>;
/// The RTC mutex, which is used to access the RTC from multiple tasks.
pub static RTC_MUTEX: RtcType = Mutex::new(None);

/// The date the RTC starts at after a power loss: Monday, 2024-01-01 00:00:00
const SEED: DateTime = DateTime {
    year: 2024,
    month: 1,
    day: 1,
    day_of_week: DayOfWeek::Monday,
    hour: 0,
    minute: 0,
    second: 0,
};

/// Start the RTC and put it into the mutex
pub async fn init_rtc(rtc: Peri<'static, RTC>) {
    let mut rtc = Rtc::new(rtc);
    if !rtc.is_running() {
        info!("RTC not running, seeding it");
        if let Err(e) = rtc.set_datetime(SEED) {
            warn!("Failed to seed the RTC: {:?}", Debug2Format(&e));
        }
    }
    *(RTC_MUTEX.lock().await) = Some(rtc);
}

/// Read the RTC. Falls back to the seed date when the RTC is not available.
pub async fn now() -> Timestamp {
    let rtc_guard = RTC_MUTEX.lock().await;
    let dt = match rtc_guard.as_ref().map(Rtc::now) {
        Some(Ok(dt)) => dt,
        Some(Err(e)) => {
            info!("RTC not running: {:?}", Debug2Format(&e));
            SEED
        }
        None => {
            warn!("RTC not initialized");
            SEED
        }
    };
    drop(rtc_guard);
    to_timestamp(&dt)
}

/// Convert an RTC reading
fn to_timestamp(dt: &DateTime) -> Timestamp {
    Timestamp::new(dt.year, dt.month, dt.day, dt.hour, dt.minute).with_second(dt.second)
}
