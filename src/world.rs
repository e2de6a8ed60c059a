//! The simulation world: particle arena, constraint arenas, fixed step.

use crate::float::Float;
use crate::particle::Particle;
use crate::constraint::{Constraint, ContactConstraint};
use crate::config::WorldConfig;
use crate::observer::{StepObserver, NoOpStepObserver};
use crate::error::PhysicsError;
use alloc::vec::Vec as AllocVec;

/// Owns all particles and constraints and advances them one fixed timestep
/// at a time: predict, relax, reconcile.
///
/// Persistent constraints solve in insertion order within each relaxation
/// pass; that order is deterministic and affects convergence, so identical
/// setups reproduce bit-identical trajectories. Transient soft contacts
/// live in their own collection, rebuilt by the driver every frame, and
/// solve after the persistent arena in each pass.
pub struct World<F: Float> {
    pub particles: AllocVec<Particle<F>>,
    pub constraints: AllocVec<Constraint<F>>,
    pub config: WorldConfig<F>,
    contacts: AllocVec<ContactConstraint<F>>,
    tick: u64,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>) -> Result<Self, PhysicsError> {
        if !(config.dt > F::zero()) || !config.dt.is_finite() {
            return Err(PhysicsError::InvalidTimestep);
        }
        Ok(World {
            particles: AllocVec::new(),
            constraints: AllocVec::new(),
            config,
            contacts: AllocVec::new(),
            tick: 0,
        })
    }

    pub fn add_particle(&mut self, particle: Particle<F>) -> usize {
        let idx = self.particles.len();
        self.particles.push(particle);
        idx
    }

    pub fn add_constraint(&mut self, constraint: Constraint<F>) -> usize {
        let idx = self.constraints.len();
        self.constraints.push(constraint);
        idx
    }

    /// Pairwise soft-contact sweep across index groups (one group per body's
    /// outer ring). Every cross-group pair currently closer than `min_dist`
    /// gets a transient contact. O(n²) over the group particles; fine for a
    /// handful of bodies.
    pub fn build_contacts(&mut self, groups: &[&[usize]], min_dist: F, stiffness: F) {
        for (gi, a_group) in groups.iter().enumerate() {
            for b_group in groups.iter().skip(gi + 1) {
                for &a in a_group.iter() {
                    for &b in b_group.iter() {
                        let d_sq = self.particles[a].pos.distance_sq(self.particles[b].pos);
                        if d_sq < min_dist * min_dist {
                            self.contacts.push(ContactConstraint::new(a, b, min_dist, stiffness));
                        }
                    }
                }
            }
        }
    }

    /// Drop every soft contact registered since the last clear. Call once
    /// per frame before rebuilding; contacts are per-step, never persistent.
    pub fn clear_contacts(&mut self) {
        self.contacts.clear();
    }

    /// Advance one fixed timestep.
    pub fn step(&mut self) {
        self.step_with(&mut NoOpStepObserver);
    }

    /// Advance one fixed timestep, reporting phases to `observer`.
    pub fn step_with<O: StepObserver>(&mut self, observer: &mut O) {
        let WorldConfig { dt, gravity, iterations, damping } = self.config;

        for p in self.particles.iter_mut() {
            p.integrate(dt, gravity, damping);
        }
        observer.on_integrate();

        for i in 0..iterations {
            for c in self.constraints.iter_mut() {
                c.solve(&mut self.particles);
            }
            for c in self.contacts.iter() {
                c.solve(&mut self.particles);
            }
            observer.on_constraint_iteration(i);
        }

        for p in self.particles.iter_mut() {
            p.reconcile(dt);
        }

        self.tick += 1;
        observer.on_step_complete();
    }

    /// Steps taken since construction.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn contact_count(&self) -> usize { self.contacts.len() }
    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> { &mut self.particles[index] }
    pub fn constraint(&self, index: usize) -> &Constraint<F> { &self.constraints[index] }
    pub fn constraint_mut(&mut self, index: usize) -> &mut Constraint<F> { &mut self.constraints[index] }
}
