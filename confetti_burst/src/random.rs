//! Random draws used when seeding particles.

use rand::Rng;

use crate::arena::Vec3;

/// Mean of three uniform(−0.5, 0.5) draws: a cheap bell-ish sample in
/// `[−0.5, 0.5]` concentrated near zero.
pub fn triangular<R: Rng>(rng: &mut R) -> f32 {
    let mut total = 0.0;
    for _ in 0..3 {
        total += rng.gen::<f32>() - 0.5;
    }
    total / 3.0
}

/// Unit vector with non-negative components.
pub fn unit_axis<R: Rng>(rng: &mut R) -> Vec3 {
    let v = Vec3::new(rng.gen(), rng.gen(), rng.gen());
    v.normalized().unwrap_or(Vec3::new(0.0, 0.0, 1.0))
}
