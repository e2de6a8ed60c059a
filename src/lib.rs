//! Deformable tire simulation with position-based dynamics.
//!
//! `pneu` simulates 2D ring bodies ("tires") under gravity, steering,
//! inflation, and contact. Positions are corrected directly to satisfy
//! constraints; velocity is derived afterward from the position delta
//! (XPBD-style), which keeps large timesteps stable and folds constraint
//! impulses into the motion for free.
//!
//! # Features
//!
//! - **Fixed-step solver**: predict, relax (Gauss–Seidel passes), reconcile
//! - **Constraint set**: distance, signed-area pressure, one-sided soft
//!   contact, static box and ground contact
//! - **Tire bodies**: two concentric particle rings joined by spokes, a
//!   pressurized outer boundary, and a hub for steering reference
//! - **Live tuning**: stiffness and mass-scale edits without rebuilding
//! - **NaN-safe**: degenerate geometry skips its correction; non-finite
//!   deltas are clamped to zero instead of propagating
//! - **Observable**: monitor step phases via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments
//!
//! # Example
//!
//! ```
//! use pneu::{World, WorldConfig, Tire, TireConfig, Vec2};
//!
//! let mut world: World<f32> = World::new(WorldConfig::new()).unwrap();
//! let tire = Tire::new(&mut world, Vec2::new(320.0, 200.0), &TireConfig::default()).unwrap();
//! tire.add_ground_contacts(&mut world, 380.0, 12.0);
//!
//! for _ in 0..60 {
//!     tire.inflate(&mut world);
//!     world.step();
//! }
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod config;
pub mod world;
pub mod tire;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec2, Aabb};
pub use particle::Particle;
pub use constraint::{
    Constraint, DistanceConstraint, PressureConstraint, ContactConstraint, BoxContact,
    GroundContact,
};
pub use config::WorldConfig;
pub use world::World;
pub use tire::{Tire, TireConfig, build_soft_contacts};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
