//! Crane configuration validation
//!
//! Checks a computed total load against:
//! - The manufacturer's minimum boom angle (with a 5° attention band)
//! - The rated capacity at the operating radius and at full boom extension
//!
//! The capacity check overrides the angle tier: a configuration above 80%
//! utilization is unsafe whatever its boom angle.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculation::{AUDIT_TARGET, LiftError, boom_angle, require_positive};
use crate::types::*;

/// Width of the attention band above the manufacturer minimum, in degrees
pub const ATTENTION_ZONE_MARGIN_DEG: f64 = 5.0;

/// Highest acceptable utilization of either rated capacity, in percent
pub const MAX_UTILIZATION_PCT: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyTier {
    /// Clear of every limit
    Safe,

    /// Valid, but the boom angle is close to the manufacturer minimum
    Attention,

    /// Below the minimum boom angle or above the utilization limit
    Unsafe,
}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyTier::Safe => write!(f, "SAFE"),
            SafetyTier::Attention => write!(f, "ATTENTION"),
            SafetyTier::Unsafe => write!(f, "UNSAFE"),
        }
    }
}

/// Crane figures a lift is checked against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraneSetup {
    /// Rated capacity at the operating radius
    pub capacity_at_radius: Weight,

    /// Rated capacity with the boom at full extension
    pub capacity_at_max_extension: Weight,

    /// Horizontal distance from the slewing centre to the hook
    pub operating_radius: Distance,

    /// Boom length
    pub boom_extension: Distance,

    /// Manufacturer minimum boom angle
    pub minimum_boom_angle: BoomAngle,
}

impl CraneSetup {
    pub fn validate(&self, total_load: Weight) -> Result<ValidationResult, LiftError> {
        validate_crane(
            total_load,
            self.capacity_at_radius,
            self.capacity_at_max_extension,
            self.operating_radius,
            self.boom_extension,
            self.minimum_boom_angle,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationDetails {
    pub total_load: Weight,
    pub crane: CraneSetup,

    /// Angle between the boom and the ground plane
    pub boom_angle: BoomAngle,

    pub radius_utilization_pct: f64,
    pub extension_utilization_pct: f64,
    pub worst_utilization_pct: f64,

    /// Angle is valid but within the attention band above the minimum
    pub attention_zone: bool,

    /// Tier from the angle check alone
    pub angle_tier: SafetyTier,

    /// Worst utilization is above [`MAX_UTILIZATION_PCT`]
    pub capacity_exceeded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_adequate: bool,
    pub tier: SafetyTier,
    pub message: String,
    pub details: ValidationDetails,
}

impl ValidationResult {
    pub fn boom_angle(&self) -> BoomAngle {
        self.details.boom_angle
    }

    pub fn attention_zone(&self) -> bool {
        self.details.attention_zone
    }

    pub fn worst_utilization_pct(&self) -> f64 {
        self.details.worst_utilization_pct
    }
}

/// Validate a crane configuration for a given total load.
///
/// Input errors are returned before any computation: every figure must be
/// positive, the minimum angle must lie strictly between 0° and 90°, and the
/// boom cannot be shorter than the radius it reaches. A boom exactly as long
/// as the radius is accepted and comes out unsafe at 0°.
pub fn validate_crane(
    total_load: Weight,
    capacity_at_radius: Weight,
    capacity_at_max_extension: Weight,
    operating_radius: Distance,
    boom_extension: Distance,
    minimum_boom_angle: BoomAngle,
) -> Result<ValidationResult, LiftError> {
    let load_kg = require_positive("total_load", kg(total_load))?;
    let radius_capacity_kg = require_positive("capacity_at_radius", kg(capacity_at_radius))?;
    let extension_capacity_kg =
        require_positive("capacity_at_max_extension", kg(capacity_at_max_extension))?;
    let radius_m = require_positive("operating_radius", m(operating_radius))?;
    let extension_m = require_positive("boom_extension", m(boom_extension))?;
    let minimum_deg = require_positive("minimum_boom_angle", deg(minimum_boom_angle))?;
    if minimum_boom_angle >= Angle::new::<degree>(90.0) {
        return Err(LiftError::invalid(
            "minimum_boom_angle",
            minimum_deg,
            "must be below 90 degrees",
        ));
    }

    if boom_extension < operating_radius {
        return Err(LiftError::Geometry {
            operating_radius_m: radius_m,
            boom_extension_m: extension_m,
        });
    }

    let angle = boom_angle(operating_radius, boom_extension);
    let attention_limit = minimum_boom_angle + Angle::new::<degree>(ATTENTION_ZONE_MARGIN_DEG);

    let angle_tier = if angle < minimum_boom_angle {
        SafetyTier::Unsafe
    } else if angle < attention_limit {
        SafetyTier::Attention
    } else {
        SafetyTier::Safe
    };

    let radius_utilization_pct = load_kg / radius_capacity_kg * 100.0;
    let extension_utilization_pct = load_kg / extension_capacity_kg * 100.0;
    let worst_utilization_pct = radius_utilization_pct.max(extension_utilization_pct);
    let capacity_exceeded = worst_utilization_pct > MAX_UTILIZATION_PCT;

    let tier = if capacity_exceeded {
        SafetyTier::Unsafe
    } else {
        angle_tier
    };

    let message = match (angle_tier, capacity_exceeded) {
        (SafetyTier::Unsafe, true) => format!(
            "UNSAFE OPERATION: the boom angle ({}) is BELOW the manufacturer minimum ({}), risking tip-over, \
             and the load exceeds {:.0}% of the crane capacity (utilization: {:.2}%).",
            DisplayAngle(angle),
            DisplayAngle(minimum_boom_angle),
            MAX_UTILIZATION_PCT,
            worst_utilization_pct,
        ),
        (_, true) => format!(
            "UNSAFE OPERATION: the load exceeds {:.0}% of the crane capacity (utilization: {:.2}%).",
            MAX_UTILIZATION_PCT, worst_utilization_pct,
        ),
        (SafetyTier::Unsafe, false) => format!(
            "UNSAFE OPERATION: the boom angle ({}) is BELOW the manufacturer minimum ({}), risking tip-over.",
            DisplayAngle(angle),
            DisplayAngle(minimum_boom_angle),
        ),
        (SafetyTier::Attention, false) => format!(
            "ATTENTION: the boom angle ({}) is within {:.0}° of the manufacturer minimum ({}). \
             A larger angle margin is recommended.",
            DisplayAngle(angle),
            ATTENTION_ZONE_MARGIN_DEG,
            DisplayAngle(minimum_boom_angle),
        ),
        (SafetyTier::Safe, false) => "Crane is adequate for the lift.".to_string(),
    };

    if capacity_exceeded {
        warn!(
            target: AUDIT_TARGET,
            "capacity override: worst utilization {:.2}% above {:.0}% (angle tier {})",
            worst_utilization_pct,
            MAX_UTILIZATION_PCT,
            angle_tier,
        );
    }

    info!(
        target: AUDIT_TARGET,
        "crane validated: load={:.2} kg radius={:.2} m extension={:.2} m angle={:.2}° min={:.2}° \
         utilization={:.2}%/{:.2}% tier={}",
        load_kg,
        radius_m,
        extension_m,
        deg(angle),
        minimum_deg,
        radius_utilization_pct,
        extension_utilization_pct,
        tier,
    );

    Ok(ValidationResult {
        is_adequate: tier != SafetyTier::Unsafe,
        tier,
        message,
        details: ValidationDetails {
            total_load,
            crane: CraneSetup {
                capacity_at_radius,
                capacity_at_max_extension,
                operating_radius,
                boom_extension,
                minimum_boom_angle,
            },
            boom_angle: angle,
            radius_utilization_pct,
            extension_utilization_pct,
            worst_utilization_pct,
            attention_zone: angle_tier == SafetyTier::Attention,
            angle_tier,
            capacity_exceeded,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kilos(value: f64) -> Weight {
        Weight::new::<kilogram>(value)
    }

    fn meters(value: f64) -> Distance {
        Distance::new::<meter>(value)
    }

    fn degrees(value: f64) -> BoomAngle {
        BoomAngle::new::<degree>(value)
    }

    /// Light load, 60° boom, 30° minimum
    fn comfortable(total: f64) -> Result<ValidationResult, LiftError> {
        validate_crane(
            kilos(total),
            kilos(1000.0),
            kilos(1000.0),
            meters(5.0),
            meters(10.0),
            degrees(30.0),
        )
    }

    #[test]
    fn test_safe_configuration() {
        let result = comfortable(500.0).unwrap();

        assert!(result.is_adequate);
        assert_eq!(result.tier, SafetyTier::Safe);
        assert!(!result.attention_zone());
        assert_relative_eq!(deg(result.boom_angle()), 60.0, epsilon = 1e-9);
        assert_relative_eq!(result.worst_utilization_pct(), 50.0);
        assert_eq!(result.message, "Crane is adequate for the lift.");
    }

    #[test]
    fn test_angle_below_minimum_is_unsafe() {
        // arccos(0.9) ≈ 25.84°
        let result = validate_crane(
            kilos(500.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(9.0),
            meters(10.0),
            degrees(30.0),
        )
        .unwrap();

        assert!(!result.is_adequate);
        assert_eq!(result.tier, SafetyTier::Unsafe);
        assert_eq!(result.details.angle_tier, SafetyTier::Unsafe);
        assert!(!result.attention_zone());
        assert!(result.message.contains("BELOW the manufacturer minimum"));
        assert!(!result.message.contains("capacity"));
    }

    #[test]
    fn test_angle_inside_attention_band() {
        // arccos(0.8) ≈ 36.87°, minimum 33° puts it inside the 5° band
        let result = validate_crane(
            kilos(500.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(8.0),
            meters(10.0),
            degrees(33.0),
        )
        .unwrap();

        assert!(result.is_adequate);
        assert_eq!(result.tier, SafetyTier::Attention);
        assert!(result.attention_zone());
        assert!(result.message.starts_with("ATTENTION"));
    }

    #[test]
    fn test_angle_exactly_at_minimum_is_attention() {
        let first = comfortable(500.0).unwrap();
        let result = validate_crane(
            kilos(500.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(5.0),
            meters(10.0),
            first.boom_angle(),
        )
        .unwrap();

        assert!(result.is_adequate);
        assert_eq!(result.tier, SafetyTier::Attention);
        assert!(result.attention_zone());
    }

    #[test]
    fn test_flat_boom_is_unsafe_not_an_error() {
        let result = validate_crane(
            kilos(500.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(10.0),
            meters(10.0),
            degrees(1.0),
        )
        .unwrap();

        assert_relative_eq!(deg(result.boom_angle()), 0.0);
        assert!(!result.is_adequate);
        assert_eq!(result.tier, SafetyTier::Unsafe);
    }

    #[test]
    fn test_utilization_limit_is_strict() {
        let at_limit = comfortable(800.0).unwrap();
        assert_relative_eq!(at_limit.worst_utilization_pct(), 80.0);
        assert!(at_limit.is_adequate);
        assert!(!at_limit.details.capacity_exceeded);

        let over_limit = comfortable(800.001).unwrap();
        assert!(over_limit.worst_utilization_pct() > 80.0);
        assert!(!over_limit.is_adequate);
        assert_eq!(over_limit.tier, SafetyTier::Unsafe);
        assert!(over_limit.message.contains("80.00%"));
    }

    #[test]
    fn test_capacity_override_mentions_both_failures() {
        let result = validate_crane(
            kilos(900.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(9.0),
            meters(10.0),
            degrees(30.0),
        )
        .unwrap();

        assert!(!result.is_adequate);
        assert!(result.message.contains("BELOW the manufacturer minimum"));
        assert!(result.message.contains("90.00%"));
    }

    #[test]
    fn test_capacity_override_keeps_attention_flag() {
        let result = validate_crane(
            kilos(900.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(8.0),
            meters(10.0),
            degrees(33.0),
        )
        .unwrap();

        assert!(!result.is_adequate);
        assert_eq!(result.tier, SafetyTier::Unsafe);
        assert_eq!(result.details.angle_tier, SafetyTier::Attention);
        assert!(result.attention_zone());
    }

    #[test]
    fn test_boom_shorter_than_radius_is_a_geometry_error() {
        let err = validate_crane(
            kilos(500.0),
            kilos(1000.0),
            kilos(1000.0),
            meters(10.0),
            meters(5.0),
            degrees(30.0),
        )
        .unwrap_err();

        assert_eq!(
            err,
            LiftError::Geometry {
                operating_radius_m: 10.0,
                boom_extension_m: 5.0,
            }
        );
    }

    #[test]
    fn test_invalid_inputs_name_the_field() {
        let cases = [
            (comfortable(0.0), "total_load"),
            (
                validate_crane(kilos(1.0), kilos(-1.0), kilos(1.0), meters(1.0), meters(2.0), degrees(30.0)),
                "capacity_at_radius",
            ),
            (
                validate_crane(kilos(1.0), kilos(1.0), kilos(0.0), meters(1.0), meters(2.0), degrees(30.0)),
                "capacity_at_max_extension",
            ),
            (
                validate_crane(kilos(1.0), kilos(1.0), kilos(1.0), meters(0.0), meters(2.0), degrees(30.0)),
                "operating_radius",
            ),
            (
                validate_crane(kilos(1.0), kilos(1.0), kilos(1.0), meters(1.0), meters(f64::NAN), degrees(30.0)),
                "boom_extension",
            ),
            (
                validate_crane(kilos(1.0), kilos(1.0), kilos(1.0), meters(1.0), meters(2.0), degrees(0.0)),
                "minimum_boom_angle",
            ),
            (
                validate_crane(kilos(1.0), kilos(1.0), kilos(1.0), meters(1.0), meters(2.0), degrees(90.0)),
                "minimum_boom_angle",
            ),
        ];

        for (result, field) in cases {
            assert_eq!(result.unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let a = comfortable(654.321).unwrap();
        let b = comfortable(654.321).unwrap();
        assert_eq!(a, b);
        assert_eq!(deg(a.boom_angle()).to_bits(), deg(b.boom_angle()).to_bits());
    }

    #[test]
    fn test_safe_angle_overridden_by_extension_capacity() {
        let result = validate_crane(
            kilos(2309.0),
            kilos(3000.0),
            kilos(2800.0),
            meters(8.0),
            meters(16.0),
            degrees(30.0),
        )
        .unwrap();

        assert_relative_eq!(deg(result.boom_angle()), 60.0, epsilon = 1e-9);
        assert_eq!(result.details.angle_tier, SafetyTier::Safe);
        assert_relative_eq!(result.details.radius_utilization_pct, 76.97, epsilon = 0.01);
        assert_relative_eq!(result.details.extension_utilization_pct, 82.46, epsilon = 0.01);
        assert!(!result.is_adequate);
        assert!(result.message.contains("82.46%"));
    }

    #[test]
    fn test_crane_setup_delegates() {
        let setup = CraneSetup {
            capacity_at_radius: kilos(1000.0),
            capacity_at_max_extension: kilos(1000.0),
            operating_radius: meters(5.0),
            boom_extension: meters(10.0),
            minimum_boom_angle: degrees(30.0),
        };

        assert_eq!(setup.validate(kilos(500.0)).unwrap(), comfortable(500.0).unwrap());
    }
}
