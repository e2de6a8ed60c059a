//! Positional constraints: distance, pressure, soft contact, box, ground.
//!
//! Constraints reference particles by index into the world's arena rather
//! than holding them, so two constraints may correct the same particle
//! without aliasing. Solving a constraint nudges positions toward the
//! satisfied state; repeated sequential passes converge the coupled system.

use crate::float::Float;
use crate::vec::{Vec2, Aabb};
use crate::particle::Particle;
use alloc::vec::Vec as AllocVec;

/// A positional constraint over particles in the world's arena.
pub enum Constraint<F: Float> {
    Distance(DistanceConstraint<F>),
    Pressure(PressureConstraint<F>),
    Contact(ContactConstraint<F>),
    Box(BoxContact<F>),
    Ground(GroundContact<F>),
}

impl<F: Float> Constraint<F> {
    pub fn solve(&mut self, particles: &mut [Particle<F>]) {
        match self {
            Constraint::Distance(c) => c.solve(particles),
            Constraint::Pressure(c) => c.solve(particles),
            Constraint::Contact(c) => c.solve(particles),
            Constraint::Box(c) => c.solve(particles),
            Constraint::Ground(c) => c.solve(particles),
        }
    }
}

/// Keeps two particles at a fixed rest distance.
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    /// Captured at construction, never recomputed.
    pub rest_length: F,
    /// Fraction of the detected error corrected per solve, in [0, 1].
    pub stiffness: F,
}

impl<F: Float> DistanceConstraint<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F) -> Self {
        DistanceConstraint { a, b, rest_length, stiffness }
    }

    /// Rest length taken from the particles' current separation.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle<F>], stiffness: F) -> Self {
        let rest_length = particles[a].pos.distance(particles[b].pos);
        DistanceConstraint { a, b, rest_length, stiffness }
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        let wa = particles[self.a].inv_mass;
        let wb = particles[self.b].inv_mass;
        let w = wa + wb;
        if w == F::zero() {
            return; // both pinned
        }

        let delta = particles[self.b].pos - particles[self.a].pos;
        let d = delta.length();
        if d < F::from_f32(1e-6) || !d.is_finite() {
            return; // degenerate, no safe direction
        }

        let s = self.stiffness * (d - self.rest_length) / w;
        let correction = delta.scale(s / d).finite_or_zero();

        particles[self.a].pos = particles[self.a].pos + correction.scale(wa);
        particles[self.b].pos = particles[self.b].pos - correction.scale(wb);
    }
}

/// Holds the signed area of a particle loop at its rest value, modeling
/// internal gas pressure. Resists compression and over-expansion alike.
pub struct PressureConstraint<F: Float> {
    ring: AllocVec<usize>,
    pub strength: F,
    rest_area: Option<F>,
}

impl<F: Float> PressureConstraint<F> {
    /// `ring` is the boundary loop in traversal order (consistent winding).
    pub fn new(ring: AllocVec<usize>, strength: F) -> Self {
        PressureConstraint { ring, strength, rest_area: None }
    }

    /// Signed area of the loop via the shoelace formula.
    pub fn area(&self, particles: &[Particle<F>]) -> F {
        let n = self.ring.len();
        let mut sum = F::zero();
        for i in 0..n {
            let a = particles[self.ring[i]].pos;
            let b = particles[self.ring[(i + 1) % n]].pos;
            sum = sum + a.cross(b);
        }
        sum * F::half()
    }

    /// Target area, captured on the first solve. `None` until then.
    pub fn rest_area(&self) -> Option<F> {
        self.rest_area
    }

    pub fn solve(&mut self, particles: &mut [Particle<F>]) {
        let area = self.area(particles);

        // First invocation calibrates: the as-evaluated layout defines the
        // target volume, and no correction is applied.
        let rest = match self.rest_area {
            Some(rest) => rest,
            None => {
                self.rest_area = Some(area);
                return;
            }
        };

        if !area.is_finite() {
            return;
        }

        let c = (area - rest) * self.strength;
        let n = self.ring.len();

        for i in 0..n {
            let prev = particles[self.ring[(i + n - 1) % n]].pos;
            let next = particles[self.ring[(i + 1) % n]].pos;

            // Gradient of the shoelace area with respect to this vertex.
            let grad = Vec2::new(
                (next.y - prev.y) * F::half(),
                (prev.x - next.x) * F::half(),
            );

            let p = &mut particles[self.ring[i]];
            if p.is_pinned() {
                continue;
            }

            let correction = grad.scale(c * p.inv_mass).finite_or_zero();
            p.pos = p.pos - correction;
        }
    }
}

/// One-sided separation constraint between two particles, possibly on
/// different bodies. Pushes apart below the minimum distance, never pulls.
pub struct ContactConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    pub min_dist: F,
    pub stiffness: F,
}

impl<F: Float> ContactConstraint<F> {
    pub fn new(a: usize, b: usize, min_dist: F, stiffness: F) -> Self {
        ContactConstraint { a, b, min_dist, stiffness }
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        let wa = particles[self.a].inv_mass;
        let wb = particles[self.b].inv_mass;
        let w = wa + wb;
        if w == F::zero() {
            return;
        }

        let delta = particles[self.b].pos - particles[self.a].pos;
        let d = delta.length();
        if d < F::from_f32(1e-6) || !d.is_finite() {
            return;
        }
        if d >= self.min_dist {
            return; // separated, nothing to resist
        }

        let s = self.stiffness * (d - self.min_dist) / w;
        let correction = delta.scale(s / d).finite_or_zero();

        particles[self.a].pos = particles[self.a].pos + correction.scale(wa);
        particles[self.b].pos = particles[self.b].pos - correction.scale(wb);
    }
}

/// Resolves one particle against a static rectangle expanded by a clearance
/// radius. Projects onto the nearest expanded edge only (single axis) and
/// kills the velocity component still pointing into the surface.
pub struct BoxContact<F: Float> {
    pub particle: usize,
    pub rect: Aabb<F>,
    pub radius: F,
}

impl<F: Float> BoxContact<F> {
    pub fn new(particle: usize, rect: Aabb<F>, radius: F) -> Self {
        BoxContact { particle, rect, radius }
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        let p = &mut particles[self.particle];
        if p.is_pinned() {
            return;
        }

        let x1 = self.rect.min.x - self.radius;
        let y1 = self.rect.min.y - self.radius;
        let x2 = self.rect.max.x + self.radius;
        let y2 = self.rect.max.y + self.radius;

        if p.pos.x < x1 || p.pos.x > x2 || p.pos.y < y1 || p.pos.y > y2 {
            return;
        }

        // Inside the expanded rectangle. Distances to each expanded edge;
        // the smallest picks the push-out direction.
        let dl = p.pos.x - x1;
        let dr = x2 - p.pos.x;
        let dt = p.pos.y - y1;
        let db = y2 - p.pos.y;

        let min = dl.min(dr).min(dt).min(db);

        if min == dl {
            p.pos.x = x1;
            if p.vel.x > F::zero() { p.vel.x = F::zero(); }
        } else if min == dr {
            p.pos.x = x2;
            if p.vel.x < F::zero() { p.vel.x = F::zero(); }
        } else if min == dt {
            p.pos.y = y1;
            if p.vel.y > F::zero() { p.vel.y = F::zero(); }
        } else {
            p.pos.y = y2;
            if p.vel.y < F::zero() { p.vel.y = F::zero(); }
        }
    }
}

/// Keeps one particle above a horizontal floor line, with padding.
pub struct GroundContact<F: Float> {
    pub particle: usize,
    pub y: F,
    pub padding: F,
}

impl<F: Float> GroundContact<F> {
    pub fn new(particle: usize, y: F, padding: F) -> Self {
        GroundContact { particle, y, padding }
    }

    pub fn solve(&self, particles: &mut [Particle<F>]) {
        let lim = self.y - self.padding;
        let p = &mut particles[self.particle];
        if p.is_pinned() {
            return;
        }
        if p.pos.y > lim {
            p.pos.y = lim;
            if p.vel.y > F::zero() {
                p.vel.y = F::zero();
            }
        }
    }
}
