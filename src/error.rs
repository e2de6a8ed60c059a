//! Error types for construction-time validation.
//!
//! The solver itself never faults: numeric degeneracy is handled by
//! skipping the affected correction. Errors exist only where geometry or
//! parameters are specified up front.

use core::fmt;

/// Errors that can occur when building worlds or tires.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    InvalidMass,
    /// Stiffness must be in [0, 1].
    InvalidStiffness,
    /// Timestep must be positive and finite.
    InvalidTimestep,
    /// A ring needs at least 3 segments to enclose an area.
    InsufficientSegments,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "mass must be positive and finite"),
            PhysicsError::InvalidStiffness => write!(f, "stiffness must be in [0, 1]"),
            PhysicsError::InvalidTimestep => write!(f, "timestep must be positive and finite"),
            PhysicsError::InsufficientSegments => write!(f, "ring needs at least 3 segments"),
        }
    }
}
