//! Port traits — the hexagonal boundary between the pen core and the
//! outside world.
//!
//! ```text
//!   AppService (domain) ──▶ Port trait ──▶ Adapter
//! ```
//!
//! Driven adapters (terminal view, audio cues, test mocks) implement
//! these traits. The [`AppService`](super::service::AppService) consumes
//! them via generics, so the domain core never touches a terminal, a
//! speaker, or a DOM. Every call is fire-and-forget: the core consumes
//! no return values from its collaborators.

use crate::pet::{ImageKey, PetEntity, PetId};

// ───────────────────────────────────────────────────────────────
// Presentation port (domain → view)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the core calls this to keep the view in sync.
pub trait PresentationPort {
    /// A pet was created; build its card.
    fn render_new_pet(&mut self, pet: &PetEntity);

    /// A pet's stats changed; refresh its card.
    fn update_stats(&mut self, pet: &PetEntity);

    /// Swap the image shown on a pet's card.
    fn show_image(&mut self, pet: &PetEntity, key: ImageKey);

    /// Append a line to the activity log.
    fn log_activity(&mut self, message: &str);

    /// Drop a pet's card. Keyed by id: when the farewell fires the
    /// entity itself is already gone.
    fn remove_from_view(&mut self, id: PetId);
}

// ───────────────────────────────────────────────────────────────
// Audio port (domain → speaker)
// ───────────────────────────────────────────────────────────────

/// Audio cues. Whether the ambient calls happen at all is decided by
/// [`AudioPolicy`](crate::audio::AudioPolicy); the adapter just obeys.
pub trait AudioPort {
    /// Short cue for a care action or pet creation.
    fn play_action_cue(&mut self);

    /// Cue for the pen reset.
    fn play_reset_cue(&mut self);

    /// Pause the ambient track.
    fn stop_ambient(&mut self);

    /// Restart the ambient track from the top.
    fn resume_ambient(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a schedule fires.
///
/// This keeps the [`Scheduler`](crate::scheduler::Scheduler) ignorant
/// of pets, views, and audio: it reports *that* something came due, and
/// the implementor decides what that means.
pub trait SchedulerDelegate {
    fn on_schedule_fired(&mut self, fired: ScheduleFired);
}

/// Payload passed to [`SchedulerDelegate::on_schedule_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleFired {
    /// The pet the schedule belongs to.
    pub pet: PetId,
    pub kind: ScheduleFiredKind,
}

/// Discriminant for a schedule fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFiredKind {
    /// A recurring schedule fired (decay).
    Periodic,
    /// A one-shot schedule fired and auto-disabled (farewell).
    OneShot,
}
