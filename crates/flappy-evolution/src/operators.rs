//! Element-wise genetic operators over network parameter arrays.
//!
//! Both operators visit elements in row-major order, so for a given generator
//! state the result is fully determined. Neither modifies its inputs.

use ndarray::{Array, Dimension, Zip};
use rand::Rng;

/// Uniform gene-level crossover.
///
/// Each element of the child is taken from `a` or `b` with equal probability.
///
/// # Panics
///
/// Panics if `a` and `b` have different shapes.
///
/// ```
/// use flappy_evolution::operators::crossover;
/// use ndarray::array;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let child = crossover(&a, &a, &mut rand::rng());
/// assert_eq!(child, a);
/// ```
pub fn crossover<R, D>(a: &Array<f32, D>, b: &Array<f32, D>, rng: &mut R) -> Array<f32, D>
where
    R: Rng + ?Sized,
    D: Dimension,
{
    assert_eq!(a.shape(), b.shape(), "parents must have the same shape");
    Zip::from(a)
        .and(b)
        .map_collect(|&x, &y| if rng.random_bool(0.5) { x } else { y })
}

/// Multiplicative mutation.
///
/// With probability `rate` an element is multiplied by a factor drawn
/// uniformly from `[0, 2]`; otherwise it is copied unchanged. A rate of 0
/// returns an identical array without consuming any factor draws.
///
/// # Panics
///
/// Panics if `rate` is not in `[0, 1]`.
pub fn mutate<R, D>(a: &Array<f32, D>, rate: f32, rng: &mut R) -> Array<f32, D>
where
    R: Rng + ?Sized,
    D: Dimension,
{
    let rate = f64::from(rate);
    a.map(|&x| {
        if rng.random_bool(rate) {
            x * rng.random_range(0.0..=2.0)
        } else {
            x
        }
    })
}
