//! Configuration types for the simulation world.

use crate::float::Float;

/// Fixed-timestep simulation parameters, captured at world construction.
///
/// # Builder Pattern
/// ```
/// use pneu::config::WorldConfig;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_gravity(900.0)
///     .with_iterations(18)
///     .with_damping(0.985);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct WorldConfig<F: Float> {
    /// Fixed timestep per `step()` call. Default: 1/60.
    pub dt: F,
    /// Gravity magnitude along +y (downward in screen coordinates).
    /// Default: 900.
    pub gravity: F,
    /// Number of constraint relaxation passes per step. More iterations
    /// tighten convergence; under-iterating shows as residual stretch,
    /// not instability. Default: 18.
    pub iterations: usize,
    /// Per-step velocity damping factor in (0, 1]. Models air and internal
    /// drag; 1.0 = lossless. Default: 0.985.
    pub damping: F,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            dt: F::one() / F::from_f32(60.0),
            gravity: F::from_f32(900.0),
            iterations: 18,
            damping: F::from_f32(0.985),
        }
    }

    /// Set the timestep.
    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    /// Set the gravity magnitude.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the number of relaxation iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
