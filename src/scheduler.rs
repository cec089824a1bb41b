//! Tick scheduler for decay and farewell timers.
//!
//! Logical-clock scheduler: the embedding loop calls [`Scheduler::tick`]
//! once per time unit and the scheduler notifies a [`SchedulerDelegate`]
//! when schedules come due. The scheduler knows nothing about pets'
//! stats, views, or audio — the delegate decides what a fire means.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Slots (fixed array, no heap)                            │
//! │  ┌──────┬───────────────┬──────────┬─────────┐           │
//! │  │ slot │ kind          │ pet      │ elapsed │           │
//! │  ├──────┼───────────────┼──────────┼─────────┤           │
//! │  │  0   │ Periodic {10} │ pet#1    │    7    │  decay    │
//! │  │  1   │ OneShot  {1}  │ pet#2    │    0    │  farewell │
//! │  │ ...  │               │          │         │           │
//! │  └──────┴───────────────┴──────────┴─────────┘           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Fires are not compensated: a tick that never happens (process not
//! running) is simply lost. One-shots auto-disable after firing.

use log::info;

use crate::app::ports::{ScheduleFired, ScheduleFiredKind, SchedulerDelegate};
use crate::pet::PetId;
use crate::registry::MAX_PETS;

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Human-readable label for diagnostics (e.g., "decay").
    pub label: &'static str,
    /// The pet this schedule belongs to.
    pub pet: PetId,
    /// Type of schedule.
    pub kind: ScheduleKind,
}

/// The type of schedule determines how and when it fires.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleKind {
    /// Fire every `interval_ticks` ticks, re-arming after each fire.
    Periodic { interval_ticks: u64 },
    /// Fire once after `delay_ticks` ticks, then auto-disable.
    OneShot { delay_ticks: u64 },
}

/// Opaque handle to a live schedule, returned by [`Scheduler::add`].
///
/// A handle is dead once passed to [`Scheduler::cancel`] or after
/// [`Scheduler::clear`]; holding it beyond that is a bug in the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleHandle(usize);

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
/// One decay plus at most one farewell per pet.
const MAX_SCHEDULES: usize = MAX_PETS * 2;

/// The scheduler engine.
///
/// Intentionally decoupled from the rest of the core: fires go through
/// the [`SchedulerDelegate`] callback rather than touching entities
/// directly, which keeps the scheduler independently testable.
pub struct Scheduler {
    slots: [Option<ScheduleEntry>; MAX_SCHEDULES],
}

/// Internal bookkeeping for a live schedule.
#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Ticks elapsed since add (one-shot) or since last fire (periodic).
    elapsed_ticks: u64,
    enabled: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            slots: [const { None }; MAX_SCHEDULES],
        }
    }

    /// Add a schedule. Returns a handle, or `None` if every slot is
    /// taken; callers must degrade gracefully rather than assume a
    /// slot.
    pub fn add(&mut self, schedule: Schedule) -> Option<ScheduleHandle> {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                info!(
                    "Scheduler: added '{}' for {} at slot {}",
                    schedule.label, schedule.pet, i
                );
                *slot = Some(ScheduleEntry {
                    schedule,
                    elapsed_ticks: 0,
                    enabled: true,
                });
                return Some(ScheduleHandle(i));
            }
        }
        None // All slots full.
    }

    /// Cancel a schedule. Idempotent: clearing an already-empty slot is
    /// a no-op.
    pub fn cancel(&mut self, handle: ScheduleHandle) {
        if let Some(entry) = self.slots[handle.0].take() {
            info!(
                "Scheduler: cancelled '{}' for {} (slot {})",
                entry.schedule.label, entry.schedule.pet, handle.0
            );
        }
    }

    /// Drop every schedule unconditionally (pen reset).
    pub fn clear(&mut self) {
        let dropped = self.active_count();
        self.slots = [const { None }; MAX_SCHEDULES];
        if dropped > 0 {
            info!("Scheduler: cleared {dropped} schedule(s)");
        }
    }

    /// Advance every enabled schedule by one tick.
    ///
    /// When a schedule fires, `delegate.on_schedule_fired()` receives
    /// the owning pet and the fire kind. The caller decides what that
    /// means (apply decay, finish a farewell, ...).
    pub fn tick(&mut self, delegate: &mut dyn SchedulerDelegate) {
        for slot in &mut self.slots {
            let entry = match slot {
                Some(e) if e.enabled => e,
                _ => continue,
            };

            entry.elapsed_ticks += 1;

            match entry.schedule.kind {
                ScheduleKind::Periodic { interval_ticks } => {
                    if entry.elapsed_ticks >= interval_ticks {
                        info!(
                            "Scheduler: '{}' periodic fire for {} (every {} ticks)",
                            entry.schedule.label, entry.schedule.pet, interval_ticks
                        );
                        delegate.on_schedule_fired(ScheduleFired {
                            pet: entry.schedule.pet,
                            kind: ScheduleFiredKind::Periodic,
                        });
                        entry.elapsed_ticks = 0;
                    }
                }
                ScheduleKind::OneShot { delay_ticks } => {
                    if entry.elapsed_ticks >= delay_ticks {
                        info!(
                            "Scheduler: '{}' one-shot fired for {}",
                            entry.schedule.label, entry.schedule.pet
                        );
                        delegate.on_schedule_fired(ScheduleFired {
                            pet: entry.schedule.pet,
                            kind: ScheduleFiredKind::OneShot,
                        });
                        entry.enabled = false; // Auto-disable.
                    }
                }
            }
        }
    }

    /// Number of live (enabled) schedules.
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.as_ref().is_some_and(|e| e.enabled))
            .count()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
