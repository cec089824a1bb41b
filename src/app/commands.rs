//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (key presses,
//! test harnesses) that the [`AppService`](super::service::AppService)
//! interprets and acts upon.

use crate::actions::ActionKind;
use crate::pet::{PetId, PetKind};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Create a pet with the given name and kind.
    CreatePet { name: String, kind: PetKind },

    /// Perform a care action on one pet.
    PetAction { pet: PetId, action: ActionKind },

    /// Tear down every pet and restore the ambient track per policy.
    Reset,

    /// Manual ambient-music toggle.
    ToggleAmbient,
}
