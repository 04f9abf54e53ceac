//! Drives the alarm face through its public API the way a host does, with a recording host that keeps
//! the display in a `SegmentFrame`.
use alarm_face::services::{Clock, Display, Indicator, Led, Navigator, SettingsStore, Tone};
use alarm_face::{
    AlarmFace, AlarmTune, BuzzerNote, DaySelector, EventKind, FaceConfig, FaceEvent, SegmentFrame,
    SlotIndex, Timestamp,
};

/// A host that records every request of the face
#[derive(Default)]
struct MockHost {
    now: Timestamp,
    frame: SegmentFrame,
    notes: Vec<(BuzzerNote, u16)>,
    tunes: Vec<AlarmTune>,
    illuminated: usize,
    stored: Option<bool>,
    tick_hz: Vec<u8>,
    next_face: usize,
    home_face: usize,
}

impl Clock for MockHost {
    fn now(&self) -> Timestamp {
        self.now
    }
}

impl Display for MockHost {
    fn show_text(&mut self, position: usize, text: &str) {
        self.frame.show_text(position, text);
    }
    fn set_indicator(&mut self, indicator: Indicator) {
        self.frame.set_indicator(indicator);
    }
    fn clear_indicator(&mut self, indicator: Indicator) {
        self.frame.clear_indicator(indicator);
    }
    fn set_pixel(&mut self, row: u8, column: u8) {
        self.frame.set_pixel(row, column);
    }
    fn clear_pixel(&mut self, row: u8, column: u8) {
        self.frame.clear_pixel(row, column);
    }
    fn set_colon(&mut self) {
        self.frame.set_colon();
    }
}

impl Tone for MockHost {
    fn play_note(&mut self, note: BuzzerNote, duration_ms: u16) {
        self.notes.push((note, duration_ms));
    }
    fn play_alarm(&mut self, tune: AlarmTune) {
        self.tunes.push(tune);
    }
}

impl Led for MockHost {
    fn illuminate(&mut self) {
        self.illuminated += 1;
    }
    fn off(&mut self) {}
}

impl SettingsStore for MockHost {
    fn store_alarm_enabled(&mut self, enabled: bool) {
        self.stored = Some(enabled);
    }
    fn load_alarm_enabled(&self) -> Option<bool> {
        self.stored
    }
}

impl Navigator for MockHost {
    fn next_face(&mut self) {
        self.next_face += 1;
    }
    fn home_face(&mut self) {
        self.home_face += 1;
    }
    fn request_tick_frequency(&mut self, hz: u8) {
        self.tick_hz.push(hz);
    }
}

fn press(face: &mut AlarmFace, host: &mut MockHost, kind: EventKind, times: usize) {
    for _ in 0..times {
        assert!(face.handle_event(kind.into(), host));
    }
}

fn config_24h() -> FaceConfig {
    FaceConfig {
        clock_mode_24h: true,
        ..FaceConfig::default()
    }
}

/// Set slot 2 to 07:15 on workdays with the buttons alone
fn program_workday_alarm(face: &mut AlarmFace, host: &mut MockHost) {
    press(face, host, EventKind::LightButtonUp, 1);
    // slot selection
    press(face, host, EventKind::AlarmButtonUp, 1);
    press(face, host, EventKind::LightButtonUp, 1);
    // day: each day -> one time -> workday
    press(face, host, EventKind::AlarmButtonUp, 2);
    press(face, host, EventKind::LightButtonUp, 1);
    press(face, host, EventKind::AlarmButtonUp, 7);
    press(face, host, EventKind::LightButtonUp, 1);
    // long press jumps to the next quarter hour
    press(face, host, EventKind::AlarmLongPress, 1);
    // pitch and rounds stay as they are, leave the cycle
    press(face, host, EventKind::LightButtonUp, 3);
}

#[test]
fn programming_an_alarm_with_the_buttons() {
    let mut face = AlarmFace::setup(config_24h());
    let mut host = MockHost::default();
    face.activate(&mut host);
    press(&mut face, &mut host, EventKind::Activate, 1);
    assert_eq!(host.frame.text(), "AL 1 000  ");
    assert!(host.frame.colon());

    program_workday_alarm(&mut face, &mut host);

    assert!(!face.settings().is_editing());
    assert_eq!(host.illuminated, 1);
    assert_eq!(host.tick_hz, [4, 1]);

    let slot = face.store().selected_slot();
    assert_eq!(face.store().selected_index().number(), 2);
    assert_eq!(slot.get_day(), DaySelector::Workday);
    assert_eq!((slot.get_hour(), slot.get_minute()), (7, 15));
    assert!(slot.get_enabled());
    assert_eq!(host.frame.text(), "AL 2 715  ");
    assert!(host.frame.indicator(Indicator::Bell));
    assert!(host.frame.pixels().is_empty());
}

#[test]
fn workday_alarm_fires_on_wednesday_only() {
    let mut face = AlarmFace::setup(config_24h());
    let mut host = MockHost::default();
    program_workday_alarm(&mut face, &mut host);

    // Saturday, 2024-01-06
    host.now = Timestamp::new(2024, 1, 6, 7, 15);
    assert!(!face.wants_background_task(&host));

    // Wednesday, 2024-01-10
    host.now = Timestamp::new(2024, 1, 10, 7, 15);
    assert!(face.wants_background_task(&host));
    assert_eq!(face.store().firing_index(), SlotIndex::new(1));
    press(&mut face, &mut host, EventKind::BackgroundTask, 1);
    assert_eq!(host.tunes, [AlarmTune::new(6, BuzzerNote::C8)]);

    // the same minute never fires twice
    host.now = host.now.with_second(30);
    assert!(!face.wants_background_task(&host));
}

#[test]
fn one_time_alarm_erases_itself() {
    let mut face = AlarmFace::setup(config_24h());
    let mut host = MockHost::default();
    let slot = face.store_mut().selected_slot_mut();
    slot.set_time(22, 45);
    slot.set_day(DaySelector::OneTime);
    slot.increment_beep_rounds();
    slot.set_enabled(true);

    host.now = Timestamp::new(2024, 3, 9, 22, 45);
    assert!(face.wants_background_task(&host));
    press(&mut face, &mut host, EventKind::BackgroundTask, 1);
    assert_eq!(host.tunes[0].get_rounds(), 7);

    let slot = face.store().selected_slot();
    assert!(!slot.get_enabled());
    assert_eq!(slot.get_day(), DaySelector::EachDay);
    assert_eq!((slot.get_hour(), slot.get_minute()), (0, 0));
    assert_eq!(slot.get_beep_rounds(), 6);
}

#[test]
fn pitch_preview_and_blinking_pitch_bar() {
    let mut face = AlarmFace::setup(config_24h());
    let mut host = MockHost::default();
    press(&mut face, &mut host, EventKind::LightButtonUp, 5);
    press(&mut face, &mut host, EventKind::AlarmButtonUp, 2);

    // middle -> high -> low
    assert_eq!(host.notes.len(), 6);
    assert_eq!(host.notes[0], (BuzzerNote::A8, 50));
    assert_eq!(host.notes[5], (BuzzerNote::B6, 75));
    assert_eq!(host.frame.pixels().len(), 1);

    face.handle_event(FaceEvent::new(EventKind::Tick, 1), &mut host);
    assert!(host.frame.pixels().is_empty());
    assert_eq!(host.frame.text(), "ED 1 000 6");
    face.handle_event(FaceEvent::new(EventKind::Tick, 2), &mut host);
    assert_eq!(host.frame.pixels().len(), 1);
}

#[test]
fn twelve_hour_mode_lights_pm() {
    let mut face = AlarmFace::setup(FaceConfig::default());
    let mut host = MockHost::default();
    face.store_mut().selected_slot_mut().set_time(13, 5);
    press(&mut face, &mut host, EventKind::Tick, 1);
    assert_eq!(host.frame.text(), "AL 1 105  ");
    assert!(host.frame.indicator(Indicator::Pm));

    face.store_mut().selected_slot_mut().set_time(0, 5);
    press(&mut face, &mut host, EventKind::Tick, 1);
    assert_eq!(host.frame.text(), "AL 11205  ");
    assert!(!host.frame.indicator(Indicator::Pm));
}

#[test]
fn resign_stores_whether_any_alarm_is_armed() {
    let mut face = AlarmFace::setup(config_24h());
    let mut host = MockHost::default();
    face.resign(&mut host);
    assert_eq!(host.stored, Some(false));

    face.store_mut()
        .slot_mut(SlotIndex::new(9).unwrap())
        .set_enabled(true);
    press(&mut face, &mut host, EventKind::LightButtonUp, 2);
    face.resign(&mut host);
    assert_eq!(host.stored, Some(true));
    assert!(!face.settings().is_editing());
}

#[test]
fn navigation_and_ignored_events() {
    let mut face = AlarmFace::setup(config_24h());
    let mut host = MockHost::default();
    let before = face.clone();
    press(&mut face, &mut host, EventKind::LightButtonDown, 1);
    press(&mut face, &mut host, EventKind::LowEnergyUpdate, 1);
    press(&mut face, &mut host, EventKind::LightLongPress, 1);
    press(&mut face, &mut host, EventKind::BackgroundTask, 1);
    assert_eq!(face, before);
    assert!(host.tunes.is_empty());

    press(&mut face, &mut host, EventKind::ModeButtonUp, 1);
    press(&mut face, &mut host, EventKind::Timeout, 1);
    assert_eq!((host.next_face, host.home_face), (1, 1));
}
