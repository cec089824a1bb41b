//! Static action effect table.
//!
//! Classic descriptor-table pattern: each user action is one row with
//! its stat deltas, activity-log template, and card image — no heap,
//! no `dyn`. The service applies a row via [`PetEntity::apply_delta`]
//! and then runs the neglect check.
//!
//! ```text
//! ┌────────┬─────────┬───────────┬────────────┬──────────┐
//! │ Action │ Δenergy │ Δfullness │ Δhappiness │ Image    │
//! ├────────┼─────────┼───────────┼────────────┼──────────┤
//! │ Feed   │   -15   │    +30    │     +5     │ Eating   │
//! │ Nap    │   +40   │    -10    │    -10     │ Sleeping │
//! │ Play   │   -10   │    -10    │    +30     │ Playing  │
//! └────────┴─────────┴───────────┴────────────┴──────────┘
//! ```
//!
//! [`PetEntity::apply_delta`]: crate::pet::PetEntity::apply_delta

use crate::pet::{ImageKey, StatDelta};

/// The three user-initiated care actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Feed,
    Nap,
    Play,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::Feed, Self::Nap, Self::Play];

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    /// Look up this action's row in the effect table.
    pub fn descriptor(self) -> &'static ActionDescriptor {
        match self {
            Self::Feed => &ACTIONS[0],
            Self::Nap => &ACTIONS[1],
            Self::Play => &ACTIONS[2],
        }
    }
}

/// One row of the effect table.
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub label: &'static str,
    pub delta: StatDelta,
    /// Card image requested alongside the effect.
    pub image: ImageKey,
    /// Appended to the pet's name for the activity log.
    log_suffix: &'static str,
}

impl ActionDescriptor {
    /// Activity-log message for this action, e.g. `"Biscuit ate some food!"`.
    pub fn message(&self, pet_name: &str) -> String {
        format!("{pet_name}{}", self.log_suffix)
    }
}

/// The full effect table. Order matches [`ActionKind::ALL`].
pub static ACTIONS: [ActionDescriptor; 3] = [
    ActionDescriptor {
        kind: ActionKind::Feed,
        label: "Feed",
        delta: StatDelta::new(-15, 30, 5),
        image: ImageKey::Eating,
        log_suffix: " ate some food!",
    },
    ActionDescriptor {
        kind: ActionKind::Nap,
        label: "Nap",
        delta: StatDelta::new(40, -10, -10),
        image: ImageKey::Sleeping,
        log_suffix: " took a nap!",
    },
    ActionDescriptor {
        kind: ActionKind::Play,
        label: "Play",
        delta: StatDelta::new(-10, -10, 30),
        image: ImageKey::Playing,
        log_suffix: " played and had fun!",
    },
];

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
