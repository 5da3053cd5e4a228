//! Flat per-side particle buffers.
//!
//! All groups of a side share one set of contiguous buffers, laid out group
//! after group.  Callers address particles by `(group, particle)`; the
//! offset arithmetic stays in here.

use std::ops::Range;

// ════════════════════════════════════════════════════════════════════════════
// Vec3
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` for (near) zero length.
    pub fn normalized(&self) -> Option<Vec3> {
        let len = self.length();
        if len < 1e-12 || !len.is_finite() {
            return None;
        }
        Some(Vec3::new(self.x / len, self.y / len, self.z / len))
    }
}

/// Static tumble of one confetti piece.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    /// Unit rotation axis.
    pub axis: Vec3,
    /// Radians per second.
    pub rate: f32,
}

/// Read-only snapshot of one particle for presentation code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub group:       usize,
    pub position:    Vec3,
    pub velocity:    Vec3,
    pub color:       [f32; 3],
    pub alpha:       f32,
    pub width_scale: f32,
    pub spin:        Spin,
}

// ════════════════════════════════════════════════════════════════════════════
// ParticleArena
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleArena {
    groups:       usize,
    per_group:    usize,
    positions:    Vec<Vec3>,
    velocities:   Vec<Vec3>,
    colors:       Vec<[f32; 3]>,
    alphas:       Vec<f32>,
    width_scales: Vec<f32>,
    spins:        Vec<Spin>,
}

impl ParticleArena {
    /// Zeroed buffers for `groups × per_group` particles, all transparent.
    pub fn new(groups: usize, per_group: usize) -> Self {
        let n = groups * per_group;
        ParticleArena {
            groups,
            per_group,
            positions:    vec![Vec3::ZERO; n],
            velocities:   vec![Vec3::ZERO; n],
            colors:       vec![[0.0; 3]; n],
            alphas:       vec![0.0; n],
            width_scales: vec![1.0; n],
            spins:        vec![Spin::default(); n],
        }
    }

    pub fn groups(&self)    -> usize { self.groups }
    pub fn per_group(&self) -> usize { self.per_group }
    pub fn len(&self)       -> usize { self.positions.len() }
    pub fn is_empty(&self)  -> bool  { self.positions.is_empty() }

    fn slot(&self, group: usize, particle: usize) -> Option<usize> {
        (group < self.groups && particle < self.per_group)
            .then(|| group * self.per_group + particle)
    }

    fn range(&self, group: usize) -> Range<usize> {
        let start = group.min(self.groups) * self.per_group;
        start..(start + self.per_group).min(self.positions.len())
    }

    pub fn particle(&self, group: usize, particle: usize) -> Option<ParticleView> {
        self.slot(group, particle).map(|i| self.view(i))
    }

    fn view(&self, i: usize) -> ParticleView {
        ParticleView {
            group:       i / self.per_group.max(1),
            position:    self.positions[i],
            velocity:    self.velocities[i],
            color:       self.colors[i],
            alpha:       self.alphas[i],
            width_scale: self.width_scales[i],
            spin:        self.spins[i],
        }
    }

    /// Every particle of the side, idle groups included.
    pub fn iter(&self) -> impl Iterator<Item = ParticleView> + '_ {
        (0..self.len()).map(move |i| self.view(i))
    }

    /// Particles of one group.
    pub fn group_iter(&self, group: usize) -> impl Iterator<Item = ParticleView> + '_ {
        self.range(group).map(move |i| self.view(i))
    }

    // ── flat buffers, for sinks that upload whole attributes ─────────────

    pub fn positions(&self)    -> &[Vec3]     { &self.positions }
    pub fn velocities(&self)   -> &[Vec3]     { &self.velocities }
    pub fn colors(&self)       -> &[[f32; 3]] { &self.colors }
    pub fn alphas(&self)       -> &[f32]      { &self.alphas }
    pub fn width_scales(&self) -> &[f32]      { &self.width_scales }
    pub fn spins(&self)        -> &[Spin]     { &self.spins }

    // ── crate-internal mutation ──────────────────────────────────────────

    pub(crate) fn set_look(
        &mut self,
        group: usize,
        particle: usize,
        position: Vec3,
        color: [f32; 3],
        width_scale: f32,
        spin: Spin,
    ) {
        if let Some(i) = self.slot(group, particle) {
            self.positions[i]    = position;
            self.colors[i]       = color;
            self.width_scales[i] = width_scale;
            self.spins[i]        = spin;
            self.alphas[i]       = 0.0;
        }
    }

    /// Position and velocity slices of one group.
    pub(crate) fn motion_mut(&mut self, group: usize) -> (&mut [Vec3], &mut [Vec3]) {
        let r = self.range(group);
        (&mut self.positions[r.clone()], &mut self.velocities[r])
    }

    pub(crate) fn set_group_alpha(&mut self, group: usize, alpha: f32) {
        let r = self.range(group);
        self.alphas[r].fill(alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_group_major() {
        let mut a = ParticleArena::new(3, 4);
        a.set_look(1, 2, Vec3::new(7.0, 8.0, 9.0), [1.0, 0.0, 0.0], 1.5, Spin::default());
        assert_eq!(a.positions()[1 * 4 + 2], Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(a.particle(1, 2).unwrap().group, 1);
    }

    #[test]
    fn out_of_range_is_none() {
        let a = ParticleArena::new(3, 4);
        assert!(a.particle(3, 0).is_none());
        assert!(a.particle(0, 4).is_none());
        assert_eq!(a.group_iter(5).count(), 0);
    }

    #[test]
    fn group_alpha_touches_only_that_group() {
        let mut a = ParticleArena::new(3, 4);
        a.set_group_alpha(1, 0.5);
        let alphas: Vec<f32> = a.iter().map(|p| p.alpha).collect();
        assert_eq!(&alphas[0..4],  &[0.0; 4]);
        assert_eq!(&alphas[4..8],  &[0.5; 4]);
        assert_eq!(&alphas[8..12], &[0.0; 4]);
    }

    #[test]
    fn motion_slices_have_group_length() {
        let mut a = ParticleArena::new(2, 5);
        let (p, v) = a.motion_mut(1);
        assert_eq!(p.len(), 5);
        assert_eq!(v.len(), 5);
    }

    #[test]
    fn normalized_zero_is_none() {
        assert!(Vec3::ZERO.normalized().is_none());
        let n = Vec3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }
}
