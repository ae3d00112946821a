use std::ops::RangeInclusive;

use rand::Rng;

use super::*;
use crate::errors::GraphError;

pub trait RandomMatrixGenerator: Sized {
    /// Generates a complete directed graph on `n` nodes. Each off-diagonal entry is
    /// independently set to zero (i.e. a missing edge) with probability `zero_prob` and is
    /// drawn uniformly from `weights` otherwise. The diagonal is always zero.
    fn random_asymmetric<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        weights: RangeInclusive<Weight>,
        zero_prob: f64,
    ) -> Result<Self, GraphError>;

    /// Same as [`RandomMatrixGenerator::random_asymmetric`] but `w(u, v) == w(v, u)` for all pairs
    fn random_symmetric<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        weights: RangeInclusive<Weight>,
        zero_prob: f64,
    ) -> Result<Self, GraphError>;
}

fn draw_weight<R: Rng>(rng: &mut R, weights: &RangeInclusive<Weight>, zero_prob: f64) -> Weight {
    debug_assert!((0.0..=1.0).contains(&zero_prob));
    if zero_prob > 0.0 && rng.gen_bool(zero_prob) {
        0
    } else {
        rng.gen_range(weights.clone())
    }
}

impl RandomMatrixGenerator for WeightMatrix {
    fn random_asymmetric<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        weights: RangeInclusive<Weight>,
        zero_prob: f64,
    ) -> Result<Self, GraphError> {
        Self::try_from_fn(n, |u, v| {
            if u == v {
                0
            } else {
                draw_weight(&mut *rng, &weights, zero_prob)
            }
        })
    }

    fn random_symmetric<R: Rng>(
        rng: &mut R,
        n: NumNodes,
        weights: RangeInclusive<Weight>,
        zero_prob: f64,
    ) -> Result<Self, GraphError> {
        // draw the upper triangle first, then mirror it
        let mut upper = vec![0; (n as usize).pow(2)];
        for u in 0..n as usize {
            for v in u + 1..n as usize {
                upper[u * n as usize + v] = draw_weight(rng, &weights, zero_prob);
            }
        }

        Self::try_from_fn(n, |u, v| {
            let (u, v) = (u.min(v) as usize, u.max(v) as usize);
            upper[u * n as usize + v]
        })
    }
}
