//! Scripted randomness for pinning exact draw sequences in tests.

use hivecraft_core::DropRng;
use std::collections::VecDeque;

/// How [`ScriptedRng`] permutes slices handed to [`DropRng::shuffle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// Leave the slice untouched.
    #[default]
    Identity,
    /// Reverse the slice.
    Reverse,
}

/// A [`DropRng`] that replays fixed values and counts every draw.
///
/// Once a script runs dry the rng keeps returning its fallback, which
/// defaults to just under 1.0 so any chance below 1.0 is rejected.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    doubles: VecDeque<f64>,
    floats: VecDeque<f32>,
    fallback_double: f64,
    fallback_float: f32,
    shuffle_mode: ShuffleMode,
    double_draws: usize,
    float_draws: usize,
    shuffles: usize,
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRng {
    /// Rng with empty scripts.
    pub fn new() -> Self {
        Self {
            doubles: VecDeque::new(),
            floats: VecDeque::new(),
            fallback_double: 1.0 - f64::EPSILON,
            fallback_float: 1.0 - f32::EPSILON,
            shuffle_mode: ShuffleMode::Identity,
            double_draws: 0,
            float_draws: 0,
            shuffles: 0,
        }
    }

    /// Values returned by successive chance (`f64`) draws.
    pub fn with_doubles(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.doubles.extend(values);
        self
    }

    /// Values returned by successive ignoble (`f32`) draws.
    pub fn with_floats(mut self, values: impl IntoIterator<Item = f32>) -> Self {
        self.floats.extend(values);
        self
    }

    /// Value returned by `f64` draws once the script is exhausted.
    pub fn with_fallback_double(mut self, value: f64) -> Self {
        self.fallback_double = value;
        self
    }

    /// Permutation applied by shuffles.
    pub fn with_shuffle(mut self, mode: ShuffleMode) -> Self {
        self.shuffle_mode = mode;
        self
    }

    /// Number of `f64` draws taken so far.
    pub fn double_draws(&self) -> usize {
        self.double_draws
    }

    /// Number of `f32` draws taken so far.
    pub fn float_draws(&self) -> usize {
        self.float_draws
    }

    /// Number of shuffles performed so far.
    pub fn shuffles(&self) -> usize {
        self.shuffles
    }

    /// Total draws of any kind, shuffles included.
    pub fn total_draws(&self) -> usize {
        self.double_draws + self.float_draws + self.shuffles
    }
}

impl DropRng for ScriptedRng {
    fn next_double(&mut self) -> f64 {
        self.double_draws += 1;
        self.doubles.pop_front().unwrap_or(self.fallback_double)
    }

    fn next_float(&mut self) -> f32 {
        self.float_draws += 1;
        self.floats.pop_front().unwrap_or(self.fallback_float)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        self.shuffles += 1;
        if self.shuffle_mode == ShuffleMode::Reverse {
            items.reverse();
        }
    }
}
