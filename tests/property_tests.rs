//! Property tests for robustness of the core data structures.

use pawpen::app::ports::{ScheduleFired, SchedulerDelegate};
use pawpen::pet::{PetEntity, PetId, PetKind, STAT_MAX, STAT_MIN, StatDelta};
use pawpen::registry::{MAX_PETS, PetRegistry};
use pawpen::scheduler::{Schedule, ScheduleHandle, ScheduleKind, Scheduler};
use proptest::prelude::*;

// ── Stat clamp invariant ──────────────────────────────────────

fn arb_delta() -> impl Strategy<Value = StatDelta> {
    (-200i16..=200, -200i16..=200, -200i16..=200)
        .prop_map(|(e, f, h)| StatDelta::new(e, f, h))
}

proptest! {
    /// For any sequence of deltas, every stat stays within range after
    /// every application.
    #[test]
    fn stats_always_stay_in_range(
        deltas in proptest::collection::vec(arb_delta(), 1..=50),
    ) {
        let mut pet = PetEntity::new(PetId(1), "prop", PetKind::Dog).unwrap();
        for delta in deltas {
            pet.apply_delta(delta);
            let s = pet.stats();
            for stat in [s.energy, s.fullness, s.happiness] {
                prop_assert!((STAT_MIN..=STAT_MAX).contains(&stat));
            }
        }
    }

    /// Once Neglected, no sequence of deltas changes anything.
    #[test]
    fn neglected_pets_are_frozen(
        deltas in proptest::collection::vec(arb_delta(), 1..=50),
    ) {
        let mut pet = PetEntity::new(PetId(1), "prop", PetKind::Cat).unwrap();
        pet.apply_delta(StatDelta::new(-200, 0, 0)); // energy to the floor
        prop_assert!(pet.mark_neglected());

        let frozen = pet.stats();
        for delta in deltas {
            prop_assert!(!pet.apply_delta(delta));
            prop_assert!(!pet.mark_neglected());
            prop_assert_eq!(pet.stats(), frozen);
        }
    }
}

// ── Registry capacity invariant ───────────────────────────────

proptest! {
    /// Adds succeed exactly while the pen holds fewer than MAX_PETS.
    #[test]
    fn registry_never_exceeds_capacity(attempts in 0usize..=12) {
        let mut reg = PetRegistry::new();
        for i in 0..attempts {
            let id = reg.allocate_id();
            let pet = PetEntity::new(id, &format!("p{i}"), PetKind::Hamster).unwrap();
            let result = reg.add(pet);
            if i < MAX_PETS {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.is_err());
            }
        }
        prop_assert!(reg.len() <= MAX_PETS);
    }
}

// ── Scheduler invariants ──────────────────────────────────────

#[derive(Debug, Clone)]
enum SchedOp {
    AddPeriodic(u64),
    AddOneShot(u64),
    CancelOldest,
    Tick,
}

fn arb_sched_op() -> impl Strategy<Value = SchedOp> {
    prop_oneof![
        (1u64..=5).prop_map(SchedOp::AddPeriodic),
        (1u64..=3).prop_map(SchedOp::AddOneShot),
        Just(SchedOp::CancelOldest),
        Just(SchedOp::Tick),
    ]
}

struct CountingDelegate {
    fires: usize,
}

impl SchedulerDelegate for CountingDelegate {
    fn on_schedule_fired(&mut self, _fired: ScheduleFired) {
        self.fires += 1;
    }
}

proptest! {
    /// Arbitrary add/cancel/tick interleavings never wedge the
    /// scheduler: clear() always empties it, and afterwards nothing
    /// ever fires again.
    #[test]
    fn scheduler_never_gets_stuck(
        ops in proptest::collection::vec(arb_sched_op(), 1..=40),
    ) {
        let mut sched = Scheduler::new();
        let mut delegate = CountingDelegate { fires: 0 };
        let mut handles: Vec<ScheduleHandle> = Vec::new();
        let mut next_pet = 0u32;

        for op in ops {
            match op {
                SchedOp::AddPeriodic(interval) => {
                    next_pet += 1;
                    if let Some(h) = sched.add(Schedule {
                        label: "decay",
                        pet: PetId(next_pet),
                        kind: ScheduleKind::Periodic { interval_ticks: interval },
                    }) {
                        handles.push(h);
                    }
                }
                SchedOp::AddOneShot(delay) => {
                    next_pet += 1;
                    if let Some(h) = sched.add(Schedule {
                        label: "farewell",
                        pet: PetId(next_pet),
                        kind: ScheduleKind::OneShot { delay_ticks: delay },
                    }) {
                        handles.push(h);
                    }
                }
                SchedOp::CancelOldest => {
                    if !handles.is_empty() {
                        sched.cancel(handles.remove(0));
                    }
                }
                SchedOp::Tick => sched.tick(&mut delegate),
            }
        }

        // After any sequence, clear() must always fully reset.
        sched.clear();
        prop_assert_eq!(sched.active_count(), 0);

        let fires_before = delegate.fires;
        for _ in 0..10 {
            sched.tick(&mut delegate);
        }
        prop_assert_eq!(delegate.fires, fires_before,
            "a cleared scheduler must never fire");

        // And a fresh schedule must always find a slot.
        let fresh_schedule = Schedule {
            label: "decay",
            pet: PetId(next_pet + 1),
            kind: ScheduleKind::Periodic { interval_ticks: 1 },
        };
        let fresh_slot = sched.add(fresh_schedule).is_some();
        prop_assert!(fresh_slot);
    }

    /// A periodic schedule fires exactly floor(ticks / interval) times.
    #[test]
    fn periodic_fire_count_is_exact(
        interval in 1u64..=10,
        ticks in 0u64..=100,
    ) {
        let mut sched = Scheduler::new();
        let mut delegate = CountingDelegate { fires: 0 };
        sched.add(Schedule {
            label: "decay",
            pet: PetId(1),
            kind: ScheduleKind::Periodic { interval_ticks: interval },
        }).unwrap();

        for _ in 0..ticks {
            sched.tick(&mut delegate);
        }
        prop_assert_eq!(delegate.fires as u64, ticks / interval);
    }
}
