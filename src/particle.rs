//! Point masses with position-based dynamics and explicit velocity.

use crate::float::Float;
use crate::vec::Vec2;

/// A point mass. Velocity is authoritative only between steps: the solver
/// predicts positions from it, relaxes constraints on positions directly,
/// then derives velocity back from the position delta.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub pos: Vec2<F>,
    pub prev_pos: Vec2<F>,
    pub vel: Vec2<F>,
    /// Zero means pinned: the particle never moves and never accumulates gravity.
    pub inv_mass: F,
}

impl<F: Float> Particle<F> {
    pub fn new(pos: Vec2<F>, mass: F) -> Self {
        let inv_mass = if mass > F::zero() && mass.is_finite() {
            F::one() / mass
        } else {
            F::zero()
        };
        Particle {
            pos,
            prev_pos: pos,
            vel: Vec2::zero(),
            inv_mass,
        }
    }

    pub fn pinned(pos: Vec2<F>) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            vel: Vec2::zero(),
            inv_mass: F::zero(),
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.inv_mass == F::zero()
    }

    /// Add a velocity delta. No-op on pinned particles.
    pub fn apply_impulse(&mut self, delta: Vec2<F>) {
        if !self.is_pinned() {
            self.vel = self.vel + delta;
        }
    }

    /// Prediction phase: save the current position, accumulate gravity into
    /// vertical velocity, damp, and advance. Pinned particles only record
    /// their previous position.
    pub fn integrate(&mut self, dt: F, gravity: F, damping: F) {
        self.prev_pos = self.pos;
        if self.is_pinned() {
            return;
        }
        self.vel.y = self.vel.y + gravity * dt;
        self.vel = self.vel.scale(damping);
        self.pos = self.pos + self.vel.scale(dt);
    }

    /// Reconciliation phase: velocity becomes the position delta over dt,
    /// folding every constraint correction into it.
    pub fn reconcile(&mut self, dt: F) {
        if dt.is_near_zero(F::from_f32(1e-30)) {
            self.vel = Vec2::zero();
            return;
        }
        self.vel = (self.pos - self.prev_pos)
            .scale(F::one() / dt)
            .finite_or_zero();
    }

    pub fn pin(&mut self) {
        self.inv_mass = F::zero();
        self.vel = Vec2::zero();
        self.prev_pos = self.pos;
    }

    pub fn unpin(&mut self, mass: F) {
        self.inv_mass = if mass > F::zero() && mass.is_finite() {
            F::one() / mass
        } else {
            F::zero()
        };
    }
}
