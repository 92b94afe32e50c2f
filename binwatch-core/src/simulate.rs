//! Random-walk perturbation of bin fill levels.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::model::{BinRecord, LastUpdated};

/// Smallest delta applied to a fill level per refresh.
pub const DELTA_MIN: i32 = -5;
/// Largest delta applied to a fill level per refresh.
pub const DELTA_MAX: i32 = 4;

/// Source of per-bin fill deltas.
pub trait FillDelta: Send {
    /// Next delta to apply, expected within [`DELTA_MIN`]`..=`[`DELTA_MAX`].
    fn next_delta(&mut self) -> i32;
}

/// Uniform deltas drawn from a pseudo-random generator.
pub struct RandomDelta<R = StdRng> {
    rng: R,
}

impl RandomDelta<StdRng> {
    /// Generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> FillDelta for RandomDelta<R> {
    fn next_delta(&mut self) -> i32 {
        self.rng.gen_range(DELTA_MIN..=DELTA_MAX)
    }
}

/// Produces the next generation of bin readings.
pub struct RefreshSimulator {
    deltas: Box<dyn FillDelta>,
}

impl RefreshSimulator {
    /// Simulator drawing deltas from `deltas`.
    #[must_use]
    pub fn new(deltas: Box<dyn FillDelta>) -> Self {
        Self { deltas }
    }

    /// Simulator with a reproducible random walk.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(RandomDelta::seeded(seed)))
    }

    /// Simulator with an unpredictable random walk.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Box::new(RandomDelta::from_entropy()))
    }

    /// Perturb every bin's fill level and mark the readings as fresh.
    ///
    /// Order, identity, category, and location are preserved. Levels are
    /// clamped to `0..=100` on write.
    pub fn refresh(&mut self, current: &[BinRecord]) -> Vec<BinRecord> {
        current
            .iter()
            .map(|bin| {
                let delta = self.deltas.next_delta();
                bin.with_reading(bin.fill_level().shifted(delta), LastUpdated::JustNow)
            })
            .collect()
    }
}
