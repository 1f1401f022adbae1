//! Randomness capability consumed by loot resolution.
//!
//! Resolvers never seed or own a generator. Callers hand in whatever source the
//! surrounding simulation uses for the current tick (usually
//! [`crate::scoped_rng`]), and tests hand in scripted sources.

use rand::{seq::SliceRandom, Rng};

/// The three draw kinds loot resolution needs.
pub trait DropRng {
    /// Uniform `f64` in `[0, 1)`, used for chance rolls.
    fn next_double(&mut self) -> f64;

    /// Uniform `f32` in `[0, 1)`, used for ignoble rolls.
    fn next_float(&mut self) -> f32;

    /// Uniformly permute `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

impl<R: Rng + ?Sized> DropRng for R {
    fn next_double(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_float(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        SliceRandom::shuffle(items, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1_000 {
            let d = rng.next_double();
            let f = rng.next_float();
            assert!((0.0..1.0).contains(&d));
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut items: Vec<u32> = (0..32).collect();
        DropRng::shuffle(&mut rng, items.as_mut_slice());
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }
}
