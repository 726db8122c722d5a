//! Lift-safety calculation engine
//!
//! Two pure steps, run in order:
//! - [`compute_total_load`]: nominal load plus safety margin, rigging cable
//!   allowance and accessories
//! - [`validate_crane`]: boom angle and capacity utilization checks against
//!   the crane's rated figures
//!
//! Neither step holds state or performs I/O beyond an audit log line.

pub mod crane_validation;
pub mod geometry;
pub mod load;

pub use crane_validation::*;
pub use geometry::*;
pub use load::*;

use std::fmt;

/// Log target for the per-calculation audit trail
pub const AUDIT_TARGET: &str = "lift_core::audit";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiftError {
    /// A single field is missing, non-numeric, or outside its valid range
    #[error("{field} {reason} (received {value})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Individually valid inputs that describe an impossible crane
    #[error(
        "boom extension ({boom_extension_m} m) cannot be shorter than the operating radius ({operating_radius_m} m)"
    )]
    Geometry {
        operating_radius_m: f64,
        boom_extension_m: f64,
    },
}

impl LiftError {
    pub fn invalid(field: &'static str, value: impl fmt::Display, reason: &'static str) -> Self {
        LiftError::InvalidInput {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LiftError::InvalidInput { field, .. } => Some(field),
            LiftError::Geometry { .. } => None,
        }
    }
}

/// Reject NaN, infinities, zero and negatives
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, LiftError> {
    if !value.is_finite() {
        return Err(LiftError::invalid(field, value, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(LiftError::invalid(field, value, "must be positive"));
    }
    Ok(value)
}

/// Zero is allowed, negatives and non-finite values are not
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, LiftError> {
    if !value.is_finite() {
        return Err(LiftError::invalid(field, value, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(LiftError::invalid(field, value, "must not be negative"));
    }
    Ok(value)
}
