//! Nullable random — deterministic random number generation.

use kyc_verification::RandomSource;
use std::sync::Mutex;

/// A scripted random source for testing.
///
/// Returns pre-configured values in order, cycling when exhausted. Each value
/// is reduced modulo the requested bound.
pub struct NullRandom {
    state: Mutex<Script>,
}

struct Script {
    values: Vec<u32>,
    index: usize,
}

impl NullRandom {
    /// Create with a sequence of deterministic values. An empty sequence
    /// always yields 0.
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            state: Mutex::new(Script { values, index: 0 }),
        }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: u32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> usize {
        self.state.lock().map(|s| s.index).unwrap_or(0)
    }
}

impl RandomSource for NullRandom {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let Ok(mut script) = self.state.lock() else {
            return 0;
        };
        if script.values.is_empty() {
            return 0;
        }
        let current = script.values[script.index % script.values.len()];
        script.index += 1;
        current % bound
    }

    fn name(&self) -> &str {
        "null-random"
    }
}
