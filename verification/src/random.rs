//! Random source abstraction.

use rand::Rng;

/// Source of uniformly distributed integers.
///
/// Production code uses [`OsRandom`]; tests substitute a scripted source.
pub trait RandomSource: Send + Sync {
    /// A value in `0..bound`. Returns 0 when `bound` is 0.
    fn below(&self, bound: u32) -> u32;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}

/// Thread-local CSPRNG from `rand`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }

    fn name(&self) -> &str {
        "os-random"
    }
}
