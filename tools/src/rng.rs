//! Deterministic random number generation for scenario runs.
//!
//! RULE: the runner never calls a platform RNG. All randomness flows
//! through ScenarioRng streams derived from the single master seed, so a
//! run is fully reproducible from its seed. The core itself is RNG-free;
//! only this scaffolding rolls dice.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A deterministic RNG stream for one concern of the scenario (roster
/// generation, item arrivals, closures).
pub struct ScenarioRng {
    inner: Pcg64Mcg,
}

impl ScenarioRng {
    /// Create a stream from the master seed and a stable stream index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll a float in [lo, hi).
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// Stable stream assignments. NEVER reorder or remove entries, only
/// append; reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Roster = 0,
    Arrivals = 1,
    Closures = 2,
}

pub fn stream(master_seed: u64, slot: StreamSlot) -> ScenarioRng {
    ScenarioRng::new(master_seed, slot as u64)
}
