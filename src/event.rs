//! # Events
//! The input and lifecycle events the host delivers to the alarm face.

/// The event type delivered to the alarm face, representing button input, ticks and host lifecycle
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// The face became the visible face
    Activate,
    /// The periodic tick at the requested tick frequency
    Tick,
    /// The light button went down
    LightButtonDown,
    /// The light button was released after a short press
    LightButtonUp,
    /// The light button was held
    LightLongPress,
    /// The alarm button was released after a short press
    AlarmButtonUp,
    /// The alarm button was held
    AlarmLongPress,
    /// The host woke up to run the background task the face asked for: play the firing alarm
    BackgroundTask,
    /// The mode button was released
    ModeButtonUp,
    /// No input for a while, the host wants to return to the home face
    Timeout,
    /// The once a minute tick while the device sleeps
    LowEnergyUpdate,
}

/// An event together with the sub-second tick count it was delivered at
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceEvent {
    /// What happened
    pub kind: EventKind,
    /// Tick count within the current second, drives the blinking of the field being edited
    pub subsecond: u8,
}

impl FaceEvent {
    /// Create a new `FaceEvent`
    pub const fn new(kind: EventKind, subsecond: u8) -> Self {
        Self { kind, subsecond }
    }
}

impl From<EventKind> for FaceEvent {
    fn from(kind: EventKind) -> Self {
        Self::new(kind, 0)
    }
}
