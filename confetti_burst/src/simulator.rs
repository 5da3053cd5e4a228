//! Both sides' burst pools behind one per-tick entry point.

use hand_gesture::{Clock, CoordTransform, HandEvents, HandTracker, Side, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::ConfettiConfig;
use crate::pool::BurstPool;

/// Owns the left and right [`BurstPool`]s and the RNG that seeds them.
#[derive(Debug, Clone)]
pub struct ConfettiSimulator {
    config: ConfettiConfig,
    rng:    StdRng,
    left:   BurstPool,
    right:  BurstPool,
}

impl ConfettiSimulator {
    pub fn new(config: ConfettiConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let left  = BurstPool::new(Side::Left,  &config, &mut rng);
        let right = BurstPool::new(Side::Right, &config, &mut rng);
        ConfettiSimulator { config, rng, left, right }
    }

    pub fn config(&self) -> &ConfettiConfig { &self.config }

    pub fn pool(&self, side: Side) -> &BurstPool {
        match side {
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The side's pool, borrowed alongside the shared RNG.
    fn pool_mut(&mut self, side: Side) -> (&mut BurstPool, &mut StdRng) {
        let pool = match side {
            Side::Left  => &mut self.left,
            Side::Right => &mut self.right,
        };
        (pool, &mut self.rng)
    }

    /// Visible groups across both sides.
    pub fn active_bursts(&self) -> usize {
        self.left.visible_count() + self.right.visible_count()
    }

    /// Start a burst on `side`.  Returns the group used, or `None` if the
    /// side's pool is exhausted and the burst was dropped.
    pub fn activate(
        &mut self,
        side: Side,
        seed_position: Vec2,
        seed_velocity: Vec2,
        now: f64,
    ) -> Option<usize> {
        let (pool, rng) = self.pool_mut(side);
        pool.activate(seed_position, seed_velocity, now, rng)
    }

    /// Integrate and fade every visible group on both sides.
    pub fn tick(&mut self, dt: f32, now: f64) {
        for pool in [&mut self.left, &mut self.right] {
            pool.tick(dt, now, &self.config);
        }
    }

    /// One full simulator tick: advance existing bursts, then spawn one per
    /// side that fired, seeded from the tracker's stopped snapshot.
    pub fn update<T, C>(&mut self, events: &HandEvents, tracker: &HandTracker<T>, clock: &C)
    where
        T: CoordTransform,
        C: Clock + ?Sized,
    {
        let now = clock.elapsed();
        self.tick(clock.delta() as f32, now);

        for side in Side::BOTH {
            if !events.fired(side) {
                continue;
            }
            let hand = tracker.hand(side);
            match self.activate(side, hand.stopped_position(), hand.stopped_velocity(), now) {
                Some(group) => info!(side = side.name(), group, "confetti burst launched"),
                None        => info!(side = side.name(), "confetti burst dropped, pool full"),
            }
        }
    }
}
