//! One side's fixed pool of burst groups.

use std::f32::consts::FRAC_PI_2;

use hand_gesture::{Side, Vec2};
use rand::Rng;
use tracing::{debug, trace};

use crate::arena::{ParticleArena, Spin, Vec3};
use crate::config::ConfettiConfig;
use crate::palette::PALETTE;
use crate::random::{triangular, unit_axis};

/// Seed vertical velocity is clamped into `[SEED_VY_MIN, SEED_VY_MAX]`.
pub const SEED_VY_MIN: f32 = 300.0;
pub const SEED_VY_MAX: f32 = 1000.0;
/// A group whose alpha drops below this goes back to idle.
pub const FADE_EPSILON: f32 = 1e-3;

/// Half-extent of the placeholder scatter given to idle particles.
const IDLE_SCATTER: f32 = 100.0;
const POS_JITTER:   f32 = 20.0;
const POS_LIFT:     f32 = 10.0;
const VX_JITTER:    f32 = 100.0;
const VY_JITTER:    f32 = 200.0;
const VZ_MAX:       f32 = 2.0;
const SPIN_RATE_MAX: f32 = 10.0;

// ════════════════════════════════════════════════════════════════════════════
// GroupMeta
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMeta {
    pub visible:    bool,
    /// Clock time of the last activation, seconds.
    pub start_time: f64,
    /// Alpha shared by every particle of the group.
    pub alpha:      f32,
}

impl Default for GroupMeta {
    fn default() -> Self {
        GroupMeta { visible: false, start_time: 0.0, alpha: 0.0 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// BurstPool
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct BurstPool {
    side:   Side,
    groups: Vec<GroupMeta>,
    arena:  ParticleArena,
}

impl BurstPool {
    /// Allocate every group up front and give each particle its static look.
    pub fn new<R: Rng>(side: Side, cfg: &ConfettiConfig, rng: &mut R) -> Self {
        let groups = cfg.max_concurrent_bursts;
        let per    = cfg.particles_per_burst;
        let mut arena = ParticleArena::new(groups, per);
        let (w_min, w_span) = width_range(side);

        for g in 0..groups {
            for p in 0..per {
                let position = Vec3::new(
                    2.0 * IDLE_SCATTER * (rng.gen::<f32>() - 0.5),
                    2.0 * IDLE_SCATTER * (rng.gen::<f32>() - 0.5),
                    0.0,
                );
                let color = PALETTE[rng.gen_range(0..PALETTE.len())].rgb();
                let width = w_span * rng.gen::<f32>() + w_min;
                let spin = Spin {
                    axis: unit_axis(rng),
                    rate: SPIN_RATE_MAX * rng.gen::<f32>(),
                };
                arena.set_look(g, p, position, color, width, spin);
            }
        }

        BurstPool { side, groups: vec![GroupMeta::default(); groups], arena }
    }

    pub fn side(&self)   -> Side             { self.side }
    pub fn arena(&self)  -> &ParticleArena   { &self.arena }
    pub fn groups(&self) -> &[GroupMeta]     { &self.groups }

    pub fn group(&self, index: usize) -> Option<&GroupMeta> {
        self.groups.get(index)
    }

    pub fn visible_count(&self) -> usize {
        self.groups.iter().filter(|g| g.visible).count()
    }

    /// Index of the first idle group, if any.
    pub fn first_idle(&self) -> Option<usize> {
        self.groups.iter().position(|g| !g.visible)
    }

    /// Claim the first idle group and seed it from a hand snapshot.
    ///
    /// Returns `None`, touching nothing, when every group is in flight.
    pub fn activate<R: Rng>(
        &mut self,
        seed_position: Vec2,
        seed_velocity: Vec2,
        now: f64,
        rng: &mut R,
    ) -> Option<usize> {
        let Some(index) = self.first_idle() else {
            debug!(side = self.side.name(), "all confetti groups busy, burst dropped");
            return None;
        };

        let vy = seed_velocity.y.clamp(SEED_VY_MIN, SEED_VY_MAX);
        let (positions, velocities) = self.arena.motion_mut(index);
        for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
            let ux = triangular(rng);
            let uy = triangular(rng);
            let vx = triangular(rng);
            let vyj = triangular(rng);
            *pos = Vec3::new(
                seed_position.x + ux * POS_JITTER,
                seed_position.y + uy * POS_JITTER + POS_LIFT,
                0.0,
            );
            *vel = Vec3::new(
                seed_velocity.x + vx * VX_JITTER,
                vy + vyj * VY_JITTER,
                rng.gen_range(0.0..VZ_MAX),
            );
        }

        self.groups[index] = GroupMeta { visible: true, start_time: now, alpha: 1.0 };
        self.arena.set_group_alpha(index, 1.0);
        debug!(
            side = self.side.name(),
            group = index,
            x = seed_position.x,
            y = seed_position.y,
            vy,
            "confetti group activated"
        );
        Some(index)
    }

    /// Integrate and fade every visible group.
    pub fn tick(&mut self, dt: f32, now: f64, cfg: &ConfettiConfig) {
        for index in 0..self.groups.len() {
            if !self.groups[index].visible {
                continue;
            }
            let (positions, velocities) = self.arena.motion_mut(index);
            integrate(positions, velocities, dt, cfg.gravity, cfg.drag_coefficient);

            let elapsed = (now - self.groups[index].start_time) as f32;
            let alpha = fade_alpha(elapsed, cfg.max_visible_lifetime);
            self.arena.set_group_alpha(index, alpha);

            let meta = &mut self.groups[index];
            meta.alpha = alpha;
            if alpha < FADE_EPSILON {
                meta.visible = false;
                trace!(side = self.side.name(), group = index, "confetti group faded out");
            }
        }
    }
}

/// Width-scale range `(min, span)` per side.
fn width_range(side: Side) -> (f32, f32) {
    match side {
        Side::Left  => (0.2, 1.8),
        Side::Right => (0.5, 1.5),
    }
}

/// Semi-implicit Euler step with gravity and quadratic drag on the vertical
/// axis only; horizontal and depth velocities are left undamped.
fn integrate(positions: &mut [Vec3], velocities: &mut [Vec3], dt: f32, gravity: f32, drag: f32) {
    for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
        let ay = -v.y.signum() * 0.5 * drag * v.y * v.y - gravity;
        p.x += v.x * dt;
        p.y += v.y * dt + 0.5 * ay * dt * dt;
        p.z += v.z * dt;
        v.y += ay * dt;
    }
}

/// Quarter-cosine fade from 1 at activation to 0 at `lifetime`.
pub fn fade_alpha(elapsed: f32, lifetime: f32) -> f32 {
    if elapsed < lifetime {
        (elapsed / lifetime * FRAC_PI_2).cos().max(0.0)
    } else {
        0.0
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
