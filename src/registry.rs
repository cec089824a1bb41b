//! The pen: a bounded, insertion-ordered collection of pets.
//!
//! Backed by a fixed-capacity `heapless::Vec`, so the capacity rule is
//! enforced by the container itself. Ids are allocated monotonically
//! and never reused — a stale schedule or view key can never alias a
//! newer pet.

use log::info;

use crate::error::CapacityError;
use crate::pet::{PetEntity, PetId, PetStatus};

/// Maximum number of pets in the pen at once.
pub const MAX_PETS: usize = 4;

/// Insertion-ordered pet collection, capacity [`MAX_PETS`].
pub struct PetRegistry {
    pets: heapless::Vec<PetEntity, MAX_PETS>,
    next_id: u32,
}

impl Default for PetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PetRegistry {
    pub fn new() -> Self {
        Self {
            pets: heapless::Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate the id for the next pet. Monotonic, never reused.
    pub fn allocate_id(&mut self) -> PetId {
        let id = PetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a pet, preserving insertion order.
    pub fn add(&mut self, pet: PetEntity) -> Result<(), CapacityError> {
        match self.pets.push(pet) {
            Ok(()) => Ok(()),
            Err(_) => Err(CapacityError::PenFull),
        }
    }

    pub fn get(&self, id: PetId) -> Option<&PetEntity> {
        self.pets.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: PetId) -> Option<&mut PetEntity> {
        self.pets.iter_mut().find(|p| p.id() == id)
    }

    /// Remove a pet from the sequence, but only once it is Neglected.
    /// Active pets stay put; only a pen reset removes those.
    pub fn remove_if_neglected(&mut self, id: PetId) -> Option<PetEntity> {
        let pos = self
            .pets
            .iter()
            .position(|p| p.id() == id && p.status() == PetStatus::Neglected)?;
        let pet = self.pets.remove(pos);
        info!("Registry: removed {} ('{}')", id, pet.name());
        Some(pet)
    }

    /// Empty the pen unconditionally. Returns how many pets were
    /// dropped. The caller is responsible for cancelling their
    /// schedules first (see `AppService::reset`).
    pub fn clear(&mut self) -> usize {
        let count = self.pets.len();
        self.pets.clear();
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = &PetEntity> {
        self.pets.iter()
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pets.is_full()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
