//! Integration tests: AppService → registry/scheduler → ports.

use pawpen::actions::ActionKind;
use pawpen::app::commands::AppCommand;
use pawpen::app::ports::{AudioPort, PresentationPort};
use pawpen::app::service::AppService;
use pawpen::config::GameConfig;
use pawpen::error::{CapacityError, Error, ValidationError};
use pawpen::pet::{ImageKey, PetEntity, PetId, PetKind, Stats};
use pawpen::registry::MAX_PETS;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum ViewCall {
    Render(PetId),
    UpdateStats(PetId, Stats),
    ShowImage(PetId, ImageKey),
    Log(String),
    Remove(PetId),
}

struct MockView {
    calls: Vec<ViewCall>,
}

impl MockView {
    fn new() -> Self {
        Self { calls: Vec::new() }
    }

    fn logs(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Log(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    fn stat_updates_for(&self, id: PetId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ViewCall::UpdateStats(i, _) if *i == id))
            .count()
    }
}

impl PresentationPort for MockView {
    fn render_new_pet(&mut self, pet: &PetEntity) {
        self.calls.push(ViewCall::Render(pet.id()));
    }
    fn update_stats(&mut self, pet: &PetEntity) {
        self.calls.push(ViewCall::UpdateStats(pet.id(), pet.stats()));
    }
    fn show_image(&mut self, pet: &PetEntity, key: ImageKey) {
        self.calls.push(ViewCall::ShowImage(pet.id(), key));
    }
    fn log_activity(&mut self, message: &str) {
        self.calls.push(ViewCall::Log(message.to_string()));
    }
    fn remove_from_view(&mut self, id: PetId) {
        self.calls.push(ViewCall::Remove(id));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CueCall {
    Action,
    Reset,
    StopAmbient,
    ResumeAmbient,
}

struct MockAudio {
    calls: Vec<CueCall>,
}

impl MockAudio {
    fn new() -> Self {
        Self { calls: Vec::new() }
    }

    fn count(&self, cue: CueCall) -> usize {
        self.calls.iter().filter(|c| **c == cue).count()
    }
}

impl AudioPort for MockAudio {
    fn play_action_cue(&mut self) {
        self.calls.push(CueCall::Action);
    }
    fn play_reset_cue(&mut self) {
        self.calls.push(CueCall::Reset);
    }
    fn stop_ambient(&mut self) {
        self.calls.push(CueCall::StopAmbient);
    }
    fn resume_ambient(&mut self) {
        self.calls.push(CueCall::ResumeAmbient);
    }
}

fn make_app(config: GameConfig) -> (AppService, MockView, MockAudio) {
    (AppService::new(config), MockView::new(), MockAudio::new())
}

/// Decay on every tick so scenarios stay short.
fn fast_decay() -> GameConfig {
    GameConfig {
        decay_interval_ticks: 1,
        farewell_delay_ticks: 1,
        ..GameConfig::default()
    }
}

fn create(app: &mut AppService, view: &mut MockView, audio: &mut MockAudio, name: &str) -> PetId {
    app.create_pet(name, PetKind::Dog, view, audio).unwrap()
}

fn feed(app: &mut AppService, view: &mut MockView, audio: &mut MockAudio, id: PetId) {
    app.perform_action(id, ActionKind::Feed, view, audio);
}

// ── Feed arithmetic ───────────────────────────────────────────

#[test]
fn feeding_twice_applies_deltas_and_clamps_fullness() {
    let (mut app, mut view, mut audio) = make_app(GameConfig::default());
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");
    assert_eq!(app.pet(id).unwrap().stats(), Stats::initial());

    feed(&mut app, &mut view, &mut audio, id);
    let s = app.pet(id).unwrap().stats();
    assert_eq!((s.energy, s.fullness, s.happiness), (35, 80, 55));

    feed(&mut app, &mut view, &mut audio, id);
    let s = app.pet(id).unwrap().stats();
    // 80 + 30 clamps at 100.
    assert_eq!((s.energy, s.fullness, s.happiness), (20, 100, 60));

    assert!(view.logs().contains(&"Biscuit ate some food!"));
    assert!(
        view.calls
            .contains(&ViewCall::ShowImage(id, ImageKey::Eating))
    );
}

// ── Decay → neglect ───────────────────────────────────────────

#[test]
fn decay_drives_a_low_pet_into_neglect_exactly_once() {
    let (mut app, mut view, mut audio) = make_app(fast_decay());
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");

    // Three feeds leave energy at 5 (50 → 35 → 20 → 5).
    for _ in 0..3 {
        feed(&mut app, &mut view, &mut audio, id);
    }
    assert_eq!(app.pet(id).unwrap().stats().energy, 5);

    // One decay tick: energy clamps to 0 and the pet runs away.
    app.tick(&mut view);
    assert!(app.pet(id).is_none(), "neglected pet leaves the sequence");
    assert!(
        view.logs()
            .contains(&"Biscuit has run away due to neglect!")
    );
    assert!(
        view.calls
            .contains(&ViewCall::ShowImage(id, ImageKey::Running))
    );

    // Further ticks must not touch the pet again.
    let updates_before = view.stat_updates_for(id);
    let logs_before = view.logs().len();
    for _ in 0..5 {
        app.tick(&mut view);
    }
    assert_eq!(view.stat_updates_for(id), updates_before);
    assert_eq!(view.logs().len(), logs_before);
}

#[test]
fn farewell_removes_the_card_after_the_delay() {
    let config = GameConfig {
        decay_interval_ticks: 1,
        farewell_delay_ticks: 2,
        ..GameConfig::default()
    };
    let (mut app, mut view, mut audio) = make_app(config);
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");
    for _ in 0..3 {
        feed(&mut app, &mut view, &mut audio, id);
    }

    app.tick(&mut view); // neglect happens here
    assert!(!view.calls.contains(&ViewCall::Remove(id)));

    app.tick(&mut view); // farewell tick 1 of 2
    assert!(!view.calls.contains(&ViewCall::Remove(id)));

    app.tick(&mut view); // farewell fires
    assert!(view.calls.contains(&ViewCall::Remove(id)));
}

// ── Guards ────────────────────────────────────────────────────

#[test]
fn actions_on_missing_pets_are_noops() {
    let (mut app, mut view, mut audio) = make_app(fast_decay());
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");
    for _ in 0..3 {
        feed(&mut app, &mut view, &mut audio, id);
    }
    app.tick(&mut view); // pet runs away

    let logs_before = view.logs().len();
    app.perform_action(id, ActionKind::Feed, &mut view, &mut audio);
    app.perform_action(PetId(999), ActionKind::Play, &mut view, &mut audio);
    assert_eq!(view.logs().len(), logs_before, "no activity for no-ops");
}

// ── Capacity & validation ─────────────────────────────────────

#[test]
fn fifth_create_fails_with_capacity_error() {
    let (mut app, mut view, mut audio) = make_app(GameConfig::default());
    for i in 0..MAX_PETS {
        create(&mut app, &mut view, &mut audio, &format!("pet-{i}"));
    }
    assert_eq!(app.pet_count(), MAX_PETS);

    let err = app
        .create_pet("overflow", PetKind::Cat, &mut view, &mut audio)
        .unwrap_err();
    assert_eq!(err, Error::Capacity(CapacityError::PenFull));
    assert_eq!(app.pet_count(), MAX_PETS);
}

#[test]
fn whitespace_name_is_rejected_without_side_effects() {
    let (mut app, mut view, mut audio) = make_app(GameConfig::default());
    let err = app
        .create_pet("   \t", PetKind::Rabbit, &mut view, &mut audio)
        .unwrap_err();
    assert_eq!(err, Error::Validation(ValidationError::EmptyName));
    assert_eq!(app.pet_count(), 0);
    assert!(view.calls.is_empty(), "nothing rendered for a rejected pet");
}

// ── Reset ─────────────────────────────────────────────────────

#[test]
fn reset_clears_pets_and_silences_all_decay() {
    let (mut app, mut view, mut audio) = make_app(fast_decay());
    let a = create(&mut app, &mut view, &mut audio, "Biscuit");
    let b = create(&mut app, &mut view, &mut audio, "Mochi");

    app.handle_command(AppCommand::Reset, &mut view, &mut audio)
        .unwrap();
    assert_eq!(app.pet_count(), 0);
    assert!(view.logs().contains(&"All pets removed."));
    assert!(view.calls.contains(&ViewCall::Remove(a)));
    assert!(view.calls.contains(&ViewCall::Remove(b)));
    assert_eq!(audio.count(CueCall::Reset), 1);

    // Previously scheduled decay must never fire again.
    let updates_before = view.calls.len();
    for _ in 0..10 {
        app.tick(&mut view);
    }
    assert_eq!(view.calls.len(), updates_before);
}

#[test]
fn reset_removes_cards_still_waiting_on_their_farewell() {
    let config = GameConfig {
        decay_interval_ticks: 1,
        farewell_delay_ticks: 5,
        ..GameConfig::default()
    };
    let (mut app, mut view, mut audio) = make_app(config);
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");
    for _ in 0..3 {
        feed(&mut app, &mut view, &mut audio, id);
    }
    app.tick(&mut view); // neglected, farewell pending for 5 ticks

    app.handle_command(AppCommand::Reset, &mut view, &mut audio)
        .unwrap();
    assert!(
        view.calls.contains(&ViewCall::Remove(id)),
        "reset must not leave a ghost card behind"
    );
}

// ── Audio policy ──────────────────────────────────────────────

#[test]
fn first_action_ducks_ambient_exactly_once() {
    let (mut app, mut view, mut audio) = make_app(GameConfig::default());
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");
    assert_eq!(audio.count(CueCall::StopAmbient), 0, "creation never ducks");

    feed(&mut app, &mut view, &mut audio, id);
    feed(&mut app, &mut view, &mut audio, id);
    assert_eq!(audio.count(CueCall::StopAmbient), 1);
    assert_eq!(audio.count(CueCall::Action), 3); // create + two feeds
}

#[test]
fn reset_resumes_ambient_unless_manually_muted() {
    let (mut app, mut view, mut audio) = make_app(GameConfig::default());
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");
    feed(&mut app, &mut view, &mut audio, id);

    app.handle_command(AppCommand::Reset, &mut view, &mut audio)
        .unwrap();
    assert_eq!(audio.count(CueCall::ResumeAmbient), 1);

    // Mute by hand, then reset again: stays silent.
    app.handle_command(AppCommand::ToggleAmbient, &mut view, &mut audio)
        .unwrap();
    app.handle_command(AppCommand::Reset, &mut view, &mut audio)
        .unwrap();
    assert_eq!(audio.count(CueCall::ResumeAmbient), 1);
}

// ── Decay cadence ─────────────────────────────────────────────

#[test]
fn decay_fires_on_the_configured_interval() {
    let config = GameConfig {
        decay_interval_ticks: 10,
        ..GameConfig::default()
    };
    let (mut app, mut view, mut audio) = make_app(config);
    let id = create(&mut app, &mut view, &mut audio, "Biscuit");

    for _ in 0..9 {
        app.tick(&mut view);
    }
    assert_eq!(app.pet(id).unwrap().stats(), Stats::initial());

    app.tick(&mut view);
    let s = app.pet(id).unwrap().stats();
    assert_eq!((s.energy, s.fullness, s.happiness), (35, 35, 35));
}
