//! Deformable tire bodies: two concentric particle rings, spokes, and a
//! pressurized outer boundary, built on the world's primitives.

use crate::float::Float;
use crate::vec::{Vec2, Aabb};
use crate::particle::Particle;
use crate::constraint::{
    Constraint, DistanceConstraint, PressureConstraint, BoxContact, GroundContact,
};
use crate::world::World;
use crate::error::PhysicsError;
use alloc::vec::Vec as AllocVec;

/// Configuration for creating a tire. Defaults are the tuned values for a
/// screen-scale wheel under gravity 900 at 60 Hz.
pub struct TireConfig<F: Float> {
    /// Particles per ring. The tire has `segments` outer + `segments` inner
    /// particles plus one hub.
    pub segments: usize,
    pub outer_radius: F,
    pub inner_radius: F,
    /// The hub is heavier than the ring particles; it serves as a steering
    /// reference, not as a constrained anchor.
    pub hub_mass: F,
    pub outer_mass: F,
    pub inner_mass: F,
    /// Stiffness of the outer circumferential ring (the tread).
    pub tread_stiffness: F,
    /// Stiffness of the inner circumferential ring (the rim).
    pub rim_stiffness: F,
    /// Stiffness of the radial spokes pairing inner[i] to outer[i].
    pub spoke_stiffness: F,
    /// Strength of the signed-area pressure constraint over the outer ring.
    pub pressure_strength: F,
    /// Outward velocity impulse added per `inflate()` call. Compensates the
    /// inflation velocity that damping removes each step; without it the
    /// ring settles flattened under load.
    pub air_pressure: F,
    /// Tangential velocity impulse per unit of steering input.
    pub steer_strength: F,
}

impl<F: Float> Default for TireConfig<F> {
    fn default() -> Self {
        TireConfig {
            segments: 28,
            outer_radius: F::from_f32(50.0),
            inner_radius: F::from_f32(28.0),
            hub_mass: F::from_f32(5.0),
            outer_mass: F::one(),
            inner_mass: F::from_f32(1.4),
            tread_stiffness: F::from_f32(0.22),
            rim_stiffness: F::from_f32(0.28),
            spoke_stiffness: F::from_f32(0.35),
            pressure_strength: F::from_f32(0.00045),
            air_pressure: F::from_f32(0.002),
            steer_strength: F::from_f32(0.07),
        }
    }
}

/// A deformable ring body. Owns no particles or constraints — it records
/// indices into the world's arenas so stiffness and mass can be tuned live,
/// and translates semantic actions (steer, inflate, jump) into velocity
/// edits on its particles.
#[derive(Debug)]
pub struct Tire<F: Float> {
    hub: usize,
    outer: AllocVec<usize>,
    inner: AllocVec<usize>,
    tread_cons: AllocVec<usize>,
    rim_cons: AllocVec<usize>,
    spoke_cons: AllocVec<usize>,
    pressure_con: usize,
    outer_mass: F,
    inner_mass: F,
    pub air_pressure: F,
    pub steer_strength: F,
}

impl<F: Float> Tire<F> {
    /// Lay out `segments` particles on each of two concentric circles around
    /// `center`, plus a hub, then wire tread, rim, spoke, and pressure
    /// constraints with rest values taken from the as-built geometry.
    pub fn new(
        world: &mut World<F>,
        center: Vec2<F>,
        config: &TireConfig<F>,
    ) -> Result<Self, PhysicsError> {
        if config.segments < 3 {
            return Err(PhysicsError::InsufficientSegments);
        }
        for &mass in &[config.hub_mass, config.outer_mass, config.inner_mass] {
            if !(mass > F::zero()) || !mass.is_finite() {
                return Err(PhysicsError::InvalidMass);
            }
        }
        for &stiff in &[config.tread_stiffness, config.rim_stiffness, config.spoke_stiffness] {
            if !(stiff >= F::zero() && stiff <= F::one()) {
                return Err(PhysicsError::InvalidStiffness);
            }
        }

        let n = config.segments;
        let hub = world.add_particle(Particle::new(center, config.hub_mass));

        let mut outer = AllocVec::with_capacity(n);
        let mut inner = AllocVec::with_capacity(n);
        let two_pi = F::two() * F::pi();

        for i in 0..n {
            let angle = two_pi * F::from_f32(i as f32) / F::from_f32(n as f32);
            let dir = Vec2::new(angle.cos(), angle.sin());
            outer.push(world.add_particle(Particle::new(
                center + dir.scale(config.outer_radius),
                config.outer_mass,
            )));
            inner.push(world.add_particle(Particle::new(
                center + dir.scale(config.inner_radius),
                config.inner_mass,
            )));
        }

        let mut tread_cons = AllocVec::with_capacity(n);
        let mut rim_cons = AllocVec::with_capacity(n);
        let mut spoke_cons = AllocVec::with_capacity(n);

        for i in 0..n {
            let j = (i + 1) % n;
            let c = DistanceConstraint::from_particles(
                outer[i], outer[j], &world.particles, config.tread_stiffness,
            );
            tread_cons.push(world.add_constraint(Constraint::Distance(c)));
        }

        for i in 0..n {
            let j = (i + 1) % n;
            let c = DistanceConstraint::from_particles(
                inner[i], inner[j], &world.particles, config.rim_stiffness,
            );
            rim_cons.push(world.add_constraint(Constraint::Distance(c)));
        }

        for i in 0..n {
            let c = DistanceConstraint::from_particles(
                inner[i], outer[i], &world.particles, config.spoke_stiffness,
            );
            spoke_cons.push(world.add_constraint(Constraint::Distance(c)));
        }

        let pressure_con = world.add_constraint(Constraint::Pressure(
            PressureConstraint::new(outer.clone(), config.pressure_strength),
        ));

        Ok(Tire {
            hub,
            outer,
            inner,
            tread_cons,
            rim_cons,
            spoke_cons,
            pressure_con,
            outer_mass: config.outer_mass,
            inner_mass: config.inner_mass,
            air_pressure: config.air_pressure,
            steer_strength: config.steer_strength,
        })
    }

    /// Spin the tire by kicking every outer particle along its tangent,
    /// scaled by `dir` (sign picks the direction). No explicit rotational
    /// degree of freedom exists; this is how the wheel rolls.
    pub fn steer(&self, world: &mut World<F>, dir: F) {
        if dir == F::zero() {
            return;
        }
        let hub = world.particles[self.hub].pos;
        for &i in &self.outer {
            let p = &mut world.particles[i];
            let radial = p.pos - hub;
            let len = radial.length();
            if len.is_near_zero(F::from_f32(1e-6)) || !len.is_finite() {
                continue;
            }
            let tangent = radial.scale(F::one() / len).perp();
            p.apply_impulse(tangent.scale(self.steer_strength * dir));
        }
    }

    /// Push every outer particle outward along its radial from the hub.
    /// Called once per frame by the driver; works with the pressure
    /// constraint to keep the ring round under load.
    pub fn inflate(&self, world: &mut World<F>) {
        let hub = world.particles[self.hub].pos;
        for &i in &self.outer {
            let p = &mut world.particles[i];
            let radial = p.pos - hub;
            let len = radial.length();
            if len.is_near_zero(F::from_f32(1e-6)) || !len.is_finite() {
                continue;
            }
            let normal = radial.scale(F::one() / len);
            p.apply_impulse(normal.scale(self.air_pressure));
        }
    }

    /// Uniform velocity kick on every ring particle (jumps, external hits).
    /// The hub is advisory and not kicked.
    pub fn apply_impulse(&self, world: &mut World<F>, delta: Vec2<F>) {
        for &i in self.outer.iter().chain(self.inner.iter()) {
            world.particles[i].apply_impulse(delta);
        }
    }

    /// Live-edit the stiffness of the three constraint groups.
    pub fn set_stiffness(&self, world: &mut World<F>, tread: F, rim: F, spoke: F) {
        for &idx in &self.tread_cons {
            if let Constraint::Distance(c) = world.constraint_mut(idx) {
                c.stiffness = tread;
            }
        }
        for &idx in &self.rim_cons {
            if let Constraint::Distance(c) = world.constraint_mut(idx) {
                c.stiffness = rim;
            }
        }
        for &idx in &self.spoke_cons {
            if let Constraint::Distance(c) = world.constraint_mut(idx) {
                c.stiffness = spoke;
            }
        }
    }

    /// Live-edit the effective mass of the ring particles. `scale` multiplies
    /// each ring's base mass; non-positive or non-finite scales are ignored.
    pub fn set_mass_scale(&self, world: &mut World<F>, scale: F) {
        if !(scale > F::zero()) || !scale.is_finite() {
            return;
        }
        for &i in &self.outer {
            world.particles[i].inv_mass = F::one() / (self.outer_mass * scale);
        }
        for &i in &self.inner {
            world.particles[i].inv_mass = F::one() / (self.inner_mass * scale);
        }
    }

    /// Register a floor contact for every ring particle. The floor line sits
    /// at `y`; particles rest `padding` units above it.
    pub fn add_ground_contacts(&self, world: &mut World<F>, y: F, padding: F) {
        for &i in self.outer.iter().chain(self.inner.iter()) {
            world.add_constraint(Constraint::Ground(GroundContact::new(i, y, padding)));
        }
    }

    /// Register a static box contact for every ring particle.
    pub fn add_box_contacts(&self, world: &mut World<F>, rect: Aabb<F>, radius: F) {
        for &i in self.outer.iter().chain(self.inner.iter()) {
            world.add_constraint(Constraint::Box(BoxContact::new(i, rect, radius)));
        }
    }

    /// True when any outer particle is within `tol` of the floor line, or of
    /// a box top while horizontally inside that box. Used to gate jumps.
    pub fn is_grounded(&self, world: &World<F>, ground_y: F, boxes: &[Aabb<F>], tol: F) -> bool {
        for &i in &self.outer {
            let p = world.particles[i].pos;
            if p.y >= ground_y - tol {
                return true;
            }
            for rect in boxes {
                if p.x >= rect.min.x && p.x <= rect.max.x && p.y >= rect.min.y - tol {
                    return true;
                }
            }
        }
        false
    }

    /// Clamp the horizontal velocity of every ring particle to [-max, max].
    pub fn limit_horizontal_speed(&self, world: &mut World<F>, max: F) {
        for &i in self.outer.iter().chain(self.inner.iter()) {
            let v = &mut world.particles[i].vel;
            v.x = v.x.clamp(-max, max);
        }
    }

    /// Current signed area enclosed by the outer ring.
    pub fn area(&self, world: &World<F>) -> F {
        match world.constraint(self.pressure_con) {
            Constraint::Pressure(c) => c.area(&world.particles),
            _ => F::zero(),
        }
    }

    /// The pressure constraint's captured target area. `None` until the
    /// first step has calibrated it.
    pub fn rest_area(&self, world: &World<F>) -> Option<F> {
        match world.constraint(self.pressure_con) {
            Constraint::Pressure(c) => c.rest_area(),
            _ => None,
        }
    }

    pub fn segment_count(&self) -> usize { self.outer.len() }
    pub fn hub_index(&self) -> usize { self.hub }
    pub fn outer_indices(&self) -> &[usize] { &self.outer }
    pub fn inner_indices(&self) -> &[usize] { &self.inner }

    pub fn hub_position(&self, world: &World<F>) -> Vec2<F> {
        world.particles[self.hub].pos
    }

    /// Outer ring positions in ring order, for rendering.
    pub fn outer_positions(&self, world: &World<F>) -> AllocVec<Vec2<F>> {
        self.outer.iter().map(|&i| world.particles[i].pos).collect()
    }

    /// Inner ring positions in ring order, for rendering.
    pub fn inner_positions(&self, world: &World<F>) -> AllocVec<Vec2<F>> {
        self.inner.iter().map(|&i| world.particles[i].pos).collect()
    }
}

/// Rebuild the transient soft-contact set for a group of tires: every pair
/// of outer-ring particles on distinct tires closer than `min_dist` gets a
/// one-sided contact for this frame. Call `world.clear_contacts()` first.
pub fn build_soft_contacts<F: Float>(
    world: &mut World<F>,
    tires: &[&Tire<F>],
    min_dist: F,
    stiffness: F,
) {
    let groups: AllocVec<&[usize]> = tires.iter().map(|t| t.outer_indices()).collect();
    world.build_contacts(&groups, min_dist, stiffness);
}
