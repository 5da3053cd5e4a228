//! Simulator configuration.

/// Pool sizes and physical constants, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiConfig {
    /// Particles in each burst (P).
    pub particles_per_burst:   usize,
    /// Groups per hand side (G); bursts beyond this are dropped.
    pub max_concurrent_bursts: usize,
    /// Seconds a burst stays visible before it has fully faded.
    pub max_visible_lifetime:  f32,
    /// Downward acceleration, plane units / s².
    pub gravity:               f32,
    /// Quadratic drag coefficient on vertical velocity.
    pub drag_coefficient:      f32,
    /// RNG seed; `None` seeds from the OS.
    pub seed:                  Option<u64>,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        ConfettiConfig {
            particles_per_burst:   100,
            max_concurrent_bursts: 3,
            max_visible_lifetime:  3.0,
            gravity:               400.0,
            drag_coefficient:      0.01,
            seed:                  None,
        }
    }
}

impl ConfettiConfig {
    pub fn particles_per_burst(mut self, n: usize) -> Self {
        self.particles_per_burst = n.max(1);
        self
    }

    pub fn max_concurrent_bursts(mut self, n: usize) -> Self {
        self.max_concurrent_bursts = n.max(1);
        self
    }

    pub fn max_visible_lifetime(mut self, secs: f32) -> Self {
        self.max_visible_lifetime = secs.max(f32::EPSILON);
        self
    }

    pub fn gravity(mut self, g: f32) -> Self {
        self.gravity = g;
        self
    }

    pub fn drag_coefficient(mut self, c: f32) -> Self {
        self.drag_coefficient = c;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total particles held per side.
    pub fn particles_per_side(&self) -> usize {
        self.particles_per_burst * self.max_concurrent_bursts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ConfettiConfig::default();
        assert_eq!(c.particles_per_burst, 100);
        assert_eq!(c.max_concurrent_bursts, 3);
        assert_eq!(c.particles_per_side(), 300);
        assert_eq!(c.gravity, 400.0);
    }

    #[test]
    fn builder_clamps_sizes() {
        let c = ConfettiConfig::default().particles_per_burst(0).max_concurrent_bursts(0);
        assert_eq!(c.particles_per_side(), 1);
    }
}
