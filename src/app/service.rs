//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the registry, the scheduler, and the audio
//! policy. It exposes a clean, UI-agnostic API; all output flows
//! through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  AppCommand ──▶ ┌────────────────────────┐ ──▶ PresentationPort
//!                 │       AppService        │
//!  Scheduler  ──▶ │  Registry · Decay ·     │ ──▶ AudioPort
//!    fires        │  Actions · AudioPolicy  │
//!                 └────────────────────────┘
//! ```
//!
//! The embedding loop calls [`handle_command`](AppService::handle_command)
//! for user input and [`tick`](AppService::tick) once per time unit.

use log::{info, warn};

use crate::actions::ActionKind;
use crate::audio::{AmbientToggle, AudioPolicy};
use crate::config::GameConfig;
use crate::error::Error;
use crate::pet::{ImageKey, PetEntity, PetId, PetKind};
use crate::registry::{MAX_PETS, PetRegistry};
use crate::scheduler::{Schedule, ScheduleHandle, ScheduleKind, Scheduler};

use super::commands::AppCommand;
use super::ports::{
    AudioPort, PresentationPort, ScheduleFired, ScheduleFiredKind, SchedulerDelegate,
};

/// One decay plus at most one farewell per pet can be in flight.
const MAX_FIRES_PER_TICK: usize = MAX_PETS * 2;

// ───────────────────────────────────────────────────────────────
// Fired-schedule buffer
// ───────────────────────────────────────────────────────────────

/// Collects scheduler fires so the service can process them after the
/// scheduler borrow ends (the service cannot be its own delegate while
/// it is also being ticked).
struct FiredBuffer {
    fires: heapless::Vec<ScheduleFired, MAX_FIRES_PER_TICK>,
}

impl FiredBuffer {
    fn new() -> Self {
        Self {
            fires: heapless::Vec::new(),
        }
    }
}

impl SchedulerDelegate for FiredBuffer {
    fn on_schedule_fired(&mut self, fired: ScheduleFired) {
        if self.fires.push(fired).is_err() {
            // More fires than live schedules can exist — never expected.
            warn!("fire buffer full, dropping {:?}", fired);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    registry: PetRegistry,
    scheduler: Scheduler,
    audio_policy: AudioPolicy,
    config: GameConfig,
    /// Pets whose card is still visible while their farewell runs.
    pending_farewells: heapless::Vec<(PetId, ScheduleHandle), MAX_FIRES_PER_TICK>,
}

impl AppService {
    pub fn new(config: GameConfig) -> Self {
        Self {
            registry: PetRegistry::new(),
            scheduler: Scheduler::new(),
            audio_policy: AudioPolicy::new(),
            config,
            pending_farewells: heapless::Vec::new(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pets(&self) -> impl Iterator<Item = &PetEntity> {
        self.registry.iter()
    }

    pub fn pet(&self, id: PetId) -> Option<&PetEntity> {
        self.registry.get(id)
    }

    pub fn pet_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_pen_full(&self) -> bool {
        self.registry.is_full()
    }

    pub fn is_ambient_playing(&self) -> bool {
        self.audio_policy.is_ambient_playing()
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (key press, test harness).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        view: &mut impl PresentationPort,
        audio: &mut impl AudioPort,
    ) -> Result<(), Error> {
        match cmd {
            AppCommand::CreatePet { name, kind } => {
                self.create_pet(&name, kind, view, audio).map(|_| ())
            }
            AppCommand::PetAction { pet, action } => {
                self.perform_action(pet, action, view, audio);
                Ok(())
            }
            AppCommand::Reset => {
                self.reset(view, audio);
                Ok(())
            }
            AppCommand::ToggleAmbient => {
                self.toggle_ambient(audio);
                Ok(())
            }
        }
    }

    // ── Creation ──────────────────────────────────────────────

    /// Create a pet: validate the name, claim a pen slot, render the
    /// card with the entry image, and start the decay schedule.
    ///
    /// Fails with [`Error::Validation`] for a whitespace-only name and
    /// [`Error::Capacity`] when the pen already holds [`MAX_PETS`];
    /// neither failure changes the pen.
    pub fn create_pet(
        &mut self,
        name: &str,
        kind: PetKind,
        view: &mut impl PresentationPort,
        audio: &mut impl AudioPort,
    ) -> Result<PetId, Error> {
        let id = self.registry.allocate_id();
        let pet = PetEntity::new(id, name, kind)?;
        self.registry.add(pet)?;

        let handle = self.scheduler.add(Schedule {
            label: "decay",
            pet: id,
            kind: ScheduleKind::Periodic {
                interval_ticks: self.config.decay_interval_ticks,
            },
        });

        if let Some(pet) = self.registry.get_mut(id) {
            match handle {
                Some(h) => pet.set_decay_handle(h),
                // Only reachable when farewell churn has eaten every
                // slot; a pet without decay beats a panic.
                None => warn!("no schedule slot for {id}, decay disabled"),
            }
        }

        if let Some(pet) = self.registry.get(id) {
            view.render_new_pet(pet);
            view.show_image(pet, ImageKey::Entry);
            info!("Created {} '{}' ({})", id, pet.name(), pet.kind().label());
        }

        // The create button clicks audibly too.
        audio.play_action_cue();

        Ok(id)
    }

    // ── Care actions ──────────────────────────────────────────

    /// Apply one care action: effect-table delta, clamp, view refresh,
    /// activity log, card image, audio, then the neglect check.
    ///
    /// A missing or already-Neglected pet makes this a logged no-op —
    /// the guard holds regardless of where the call came from.
    pub fn perform_action(
        &mut self,
        id: PetId,
        action: ActionKind,
        view: &mut impl PresentationPort,
        audio: &mut impl AudioPort,
    ) {
        let descriptor = action.descriptor();
        {
            let Some(pet) = self.registry.get_mut(id) else {
                warn!("{} for unknown {id} ignored", descriptor.label);
                return;
            };
            if !pet.is_active() {
                warn!("{} for neglected {id} ignored", descriptor.label);
                return;
            }
            if pet.apply_delta(descriptor.delta) {
                view.update_stats(pet);
                view.log_activity(&descriptor.message(pet.name()));
                view.show_image(pet, descriptor.image);
            }
        }

        if self.audio_policy.duck_for_action() {
            audio.stop_ambient();
        }
        audio.play_action_cue();

        self.evaluate_neglect(id, view);
    }

    // ── Reset ─────────────────────────────────────────────────

    /// Tear down the whole pen: every schedule is cancelled *before*
    /// the entities are dropped, pending farewell cards leave the view
    /// immediately, and the ambient track resumes per policy.
    pub fn reset(&mut self, view: &mut impl PresentationPort, audio: &mut impl AudioPort) {
        self.scheduler.clear();

        while let Some((id, _)) = self.pending_farewells.pop() {
            view.remove_from_view(id);
        }

        let mut ids: heapless::Vec<PetId, MAX_PETS> = heapless::Vec::new();
        for pet in self.registry.iter() {
            let _ = ids.push(pet.id());
        }
        for id in ids {
            view.remove_from_view(id);
        }

        let count = self.registry.clear();
        view.log_activity("All pets removed.");
        info!("Pen reset: {count} pet(s) removed");

        audio.play_reset_cue();
        if self.audio_policy.on_reset() {
            audio.resume_ambient();
        }
    }

    // ── Ambient toggle ────────────────────────────────────────

    /// Manual ambient-music toggle, routed through the policy.
    pub fn toggle_ambient(&mut self, audio: &mut impl AudioPort) {
        match self.audio_policy.toggle() {
            AmbientToggle::Resume => audio.resume_ambient(),
            AmbientToggle::Pause => audio.stop_ambient(),
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance one time unit: run the scheduler, then apply whatever
    /// came due (decay applications, farewell completions).
    pub fn tick(&mut self, view: &mut impl PresentationPort) {
        let mut fired = FiredBuffer::new();
        self.scheduler.tick(&mut fired);

        for fire in fired.fires {
            match fire.kind {
                ScheduleFiredKind::Periodic => self.apply_decay(fire.pet, view),
                ScheduleFiredKind::OneShot => self.finish_farewell(fire.pet, view),
            }
        }
    }

    /// One passive decay application for one pet.
    fn apply_decay(&mut self, id: PetId, view: &mut impl PresentationPort) {
        let delta = self.config.decay_delta();
        {
            // A stale fire for a removed pet is harmless: nothing to do.
            let Some(pet) = self.registry.get_mut(id) else {
                return;
            };
            if pet.apply_delta(delta) {
                view.update_stats(pet);
            }
        }
        self.evaluate_neglect(id, view);
    }

    /// If any stat hit the floor, run the one-time neglect transition:
    /// cancel decay, show the running image, log the ran-away message,
    /// drop the pet from the sequence, and schedule the farewell.
    fn evaluate_neglect(&mut self, id: PetId, view: &mut impl PresentationPort) {
        let (name, handle) = {
            let Some(pet) = self.registry.get_mut(id) else {
                return;
            };
            if !pet.is_active() || !pet.is_starved() {
                return;
            }
            let _ = pet.mark_neglected();
            view.show_image(pet, ImageKey::Running);
            (pet.name().to_string(), pet.take_decay_handle())
        };

        if let Some(h) = handle {
            self.scheduler.cancel(h);
        }

        view.log_activity(&format!("{name} has run away due to neglect!"));
        info!("{id} '{name}' ran away due to neglect");

        let _ = self.registry.remove_if_neglected(id);

        let farewell = self.scheduler.add(Schedule {
            label: "farewell",
            pet: id,
            kind: ScheduleKind::OneShot {
                delay_ticks: self.config.farewell_delay_ticks,
            },
        });
        match farewell {
            Some(h) => {
                if self.pending_farewells.push((id, h)).is_err() {
                    // Tracking full — skip the transitional visual
                    // rather than leak the card.
                    self.scheduler.cancel(h);
                    view.remove_from_view(id);
                }
            }
            None => view.remove_from_view(id),
        }
    }

    /// The farewell delay elapsed: free the spent slot and drop the card.
    fn finish_farewell(&mut self, id: PetId, view: &mut impl PresentationPort) {
        if let Some(pos) = self.pending_farewells.iter().position(|(p, _)| *p == id) {
            let (_, handle) = self.pending_farewells.swap_remove(pos);
            self.scheduler.cancel(handle);
        }
        view.remove_from_view(id);
        info!("{id} left the pen");
    }
}
