//! Deterministic random number generation.
//!
//! RULE: Nothing in the scheduler may call any platform RNG or read the
//! system clock for seeding. All randomness flows through ScheduleRng
//! streams derived from the single base seed of a run.
//!
//! Each operating day gets its own stream, seeded from
//! (base_seed XOR mix(day_index)). This means:
//!   - A day's assignment is reproducible in isolation.
//!   - Days could be allocated in parallel without changing results.

use crate::types::DayIndex;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

const DAY_SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// A deterministic RNG stream for a single operating day.
pub struct ScheduleRng {
    pub day: DayIndex,
    inner:   Pcg64Mcg,
}

impl ScheduleRng {
    /// Create the stream for `day` from the run's base seed.
    /// The derivation must never change once schedules are shared.
    pub fn new(base_seed: u64, day: DayIndex) -> Self {
        let derived_seed = base_seed ^ (day as u64).wrapping_mul(DAY_SEED_MIX);
        Self {
            day,
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Shuffle a slice in place (Fisher–Yates over this stream).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

/// Owns the base seed of a run and hands out per-day streams.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    base_seed: u64,
}

impl RngBank {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn for_day(&self, day: DayIndex) -> ScheduleRng {
        ScheduleRng::new(self.base_seed, day)
    }
}
