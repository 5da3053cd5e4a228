//! # confetti_burst
//!
//! Fixed pools of confetti particle groups, one pool per hand side.
//!
//! * A gesture event **activates** the first idle group of its side, seeding
//!   every particle near the hand's stopped position and velocity.  If every
//!   group is still in flight the burst is dropped.
//! * Every tick, visible groups are **integrated** under gravity and
//!   quadratic vertical drag, and **faded** with a quarter-cosine over their
//!   visible lifetime.  Fully faded groups go back to idle.
//!
//! ## Quick start
//!
//! ```rust
//! use confetti_burst::{ConfettiConfig, ConfettiSimulator};
//! use hand_gesture::{Side, Vec2};
//!
//! let mut sim = ConfettiSimulator::new(ConfettiConfig::default().seed(7));
//! let group = sim.activate(Side::Left, Vec2::new(0.0, 50.0), Vec2::new(20.0, 600.0), 0.0);
//! assert_eq!(group, Some(0));
//!
//! sim.tick(1.0 / 30.0, 1.0 / 30.0);
//! assert!(sim.pool(Side::Left).group(0).unwrap().visible);
//! ```

pub mod arena;
pub mod config;
pub mod palette;
pub mod pool;
pub mod random;
pub mod simulator;

pub use arena::{ParticleArena, ParticleView, Vec3};
pub use config::ConfettiConfig;
pub use palette::{Swatch, PALETTE};
pub use pool::{BurstPool, GroupMeta, FADE_EPSILON, SEED_VY_MAX, SEED_VY_MIN};
pub use simulator::ConfettiSimulator;
