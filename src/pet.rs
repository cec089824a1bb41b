//! Pet entity: bounded stats and the Active → Neglected lifecycle.
//!
//! ```text
//!  Active ──[any stat reaches 0]──▶ Neglected ──[farewell fires]──▶ (removed)
//!    │
//!    └──────────[pen reset]────────▶ (removed)
//! ```
//!
//! Every stat mutation goes through [`PetEntity::apply_delta`], which
//! clamps all three stats back into range before anything can observe
//! them. `Neglected` is terminal: the transition happens exactly once
//! and afterwards every mutation is a silent no-op.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::scheduler::ScheduleHandle;

/// Inclusive stat range bounds.
pub const STAT_MIN: i16 = 0;
pub const STAT_MAX: i16 = 100;

/// Every stat starts here on creation.
pub const INITIAL_STAT: i16 = 50;

/// At or below this a stat is flagged in the warning line.
pub const LOW_STAT_WARNING: i16 = 20;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Stable identifier assigned by the registry at creation.
///
/// Ids are allocated monotonically and never reused, so a stale schedule
/// or view key can never alias a newer pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PetId(pub u32);

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pet#{}", self.0)
    }
}

/// The species a pet was created as. Selects the asset namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetKind {
    Dog,
    Cat,
    Rabbit,
    Hamster,
}

impl PetKind {
    pub const ALL: [PetKind; 4] = [Self::Dog, Self::Cat, Self::Rabbit, Self::Hamster];

    /// Directory name under the image root, e.g. `image/dog/`.
    pub fn asset_dir(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Rabbit => "rabbit",
            Self::Hamster => "hamster",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rabbit => "Rabbit",
            Self::Hamster => "Hamster",
        }
    }
}

/// Which image a pet card is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    /// Default image right after creation.
    Entry,
    Eating,
    Sleeping,
    Playing,
    /// Shown while the farewell delay runs after neglect.
    Running,
}

impl ImageKey {
    /// File stem under the kind's asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Eating => "eating",
            Self::Sleeping => "sleeping",
            Self::Playing => "playing",
            Self::Running => "running",
        }
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The three bounded stats, each in `[STAT_MIN, STAT_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub energy: i16,
    pub fullness: i16,
    pub happiness: i16,
}

impl Stats {
    pub const fn initial() -> Self {
        Self {
            energy: INITIAL_STAT,
            fullness: INITIAL_STAT,
            happiness: INITIAL_STAT,
        }
    }

    /// Clamp every stat back into range.
    fn clamp(&mut self) {
        self.energy = self.energy.clamp(STAT_MIN, STAT_MAX);
        self.fullness = self.fullness.clamp(STAT_MIN, STAT_MAX);
        self.happiness = self.happiness.clamp(STAT_MIN, STAT_MAX);
    }

    /// True when any stat has hit the floor — the neglect trigger.
    pub fn any_depleted(&self) -> bool {
        self.energy <= STAT_MIN || self.fullness <= STAT_MIN || self.happiness <= STAT_MIN
    }

    /// Low-stat flags for the warning line on a pet card.
    pub fn warnings(&self) -> StatWarnings {
        StatWarnings {
            low_energy: self.energy <= LOW_STAT_WARNING,
            hungry: self.fullness <= LOW_STAT_WARNING,
            sad: self.happiness <= LOW_STAT_WARNING,
        }
    }
}

/// Which stats are low enough to warrant a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatWarnings {
    pub low_energy: bool,
    pub hungry: bool,
    pub sad: bool,
}

impl StatWarnings {
    pub fn any(self) -> bool {
        self.low_energy || self.hungry || self.sad
    }
}

/// A signed adjustment applied to all three stats at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    pub energy: i16,
    pub fullness: i16,
    pub happiness: i16,
}

impl StatDelta {
    pub const fn new(energy: i16, fullness: i16, happiness: i16) -> Self {
        Self {
            energy,
            fullness,
            happiness,
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Lifecycle state of a pet. `Neglected` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetStatus {
    Active,
    Neglected,
}

/// One pet: identity, bounded stats, lifecycle state, and exclusive
/// ownership of its decay schedule handle.
#[derive(Debug)]
pub struct PetEntity {
    id: PetId,
    name: String,
    kind: PetKind,
    stats: Stats,
    status: PetStatus,
    decay_handle: Option<ScheduleHandle>,
}

impl PetEntity {
    /// Build a new pet. The name is trimmed; an empty result is rejected.
    pub fn new(id: PetId, name: &str, kind: PetKind) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self {
            id,
            name: trimmed.to_string(),
            kind,
            stats: Stats::initial(),
            status: PetStatus::Active,
            decay_handle: None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn id(&self) -> PetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PetKind {
        self.kind
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn status(&self) -> PetStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == PetStatus::Active
    }

    /// Asset path for image-backed views, e.g. `image/dog/eating.gif`.
    /// Views are free to ignore this and map (kind, key) themselves.
    pub fn asset_path(&self, key: ImageKey) -> String {
        format!("image/{}/{}.gif", self.kind.asset_dir(), key.file_name())
    }

    // ── Mutation ──────────────────────────────────────────────

    /// Apply a delta to all three stats, then clamp each to range.
    ///
    /// Returns `true` when the delta was applied, `false` for the
    /// silent no-op on a Neglected pet. Callers only notify the view
    /// on `true`.
    pub fn apply_delta(&mut self, delta: StatDelta) -> bool {
        if self.status == PetStatus::Neglected {
            return false;
        }
        self.stats.energy += delta.energy;
        self.stats.fullness += delta.fullness;
        self.stats.happiness += delta.happiness;
        self.stats.clamp();
        true
    }

    /// True when any stat has been driven to the floor.
    pub fn is_starved(&self) -> bool {
        self.stats.any_depleted()
    }

    /// Transition to Neglected. Returns `true` only on the first call;
    /// the state is terminal and re-marking is a no-op.
    pub fn mark_neglected(&mut self) -> bool {
        if self.status == PetStatus::Neglected {
            return false;
        }
        self.status = PetStatus::Neglected;
        true
    }

    // ── Decay handle ownership ────────────────────────────────

    pub fn set_decay_handle(&mut self, handle: ScheduleHandle) {
        self.decay_handle = Some(handle);
    }

    /// Take the decay handle for cancellation. Idempotent: the handle
    /// can only be taken once, so it is only ever cancelled once.
    pub fn take_decay_handle(&mut self) -> Option<ScheduleHandle> {
        self.decay_handle.take()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
