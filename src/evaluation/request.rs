//! Request payloads at the edge of the calculation
//!
//! Web forms post loosely typed text. [`LiftForm`] holds that text as
//! submitted, [`LiftRequest`] holds unit-tagged numbers, and
//! [`LiftRequest::evaluate`] turns them into typed quantities exactly once
//! before running the calculation.

use serde::{Deserialize, Serialize};

use crate::calculation::{CraneSetup, EquipmentCondition, LiftError};
use crate::config::FormConfig;
use crate::evaluation::LiftEvaluation;
use crate::types::*;

/// Parse a number typed into a form. A comma is accepted as the decimal
/// separator; blank or non-numeric text is an input error for `field`.
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, LiftError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LiftError::invalid(field, "\"\"", "is required"));
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| LiftError::invalid(field, trimmed, "is not a number"))?;

    if !value.is_finite() {
        return Err(LiftError::invalid(field, trimmed, "must be a finite number"));
    }
    Ok(value)
}

/// Raw text of the calculation form, in kilograms, meters and degrees
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftForm {
    pub load_weight_kg: String,
    pub is_new_equipment: bool,
    pub accessory_weight_kg: String,
    pub crane_manufacturer: String,
    pub crane_model: String,
    pub capacity_at_radius_kg: String,
    pub capacity_at_max_extension_kg: String,
    pub operating_radius_m: String,
    pub boom_extension_m: String,
    pub minimum_boom_angle_deg: String,
}

impl LiftForm {
    /// Blank accessories count as zero and a blank minimum angle takes the
    /// configured default; every other number is required.
    pub fn to_request(&self, form: &FormConfig) -> Result<LiftRequest, LiftError> {
        let accessory_weight = if self.accessory_weight_kg.trim().is_empty() {
            0.0
        } else {
            parse_decimal("accessory_weight", &self.accessory_weight_kg)?
        };
        let minimum_boom_angle = if self.minimum_boom_angle_deg.trim().is_empty() {
            form.default_minimum_boom_angle_deg
        } else {
            parse_decimal("minimum_boom_angle", &self.minimum_boom_angle_deg)?
        };

        Ok(LiftRequest {
            load_weight: MassValue::new(parse_decimal("raw_load_weight", &self.load_weight_kg)?, "kg"),
            condition: EquipmentCondition::from_is_new(self.is_new_equipment),
            accessory_weight: MassValue::new(accessory_weight, "kg"),
            crane_manufacturer: self.crane_manufacturer.trim().to_string(),
            crane_model: self.crane_model.trim().to_string(),
            capacity_at_radius: MassValue::new(
                parse_decimal("capacity_at_radius", &self.capacity_at_radius_kg)?,
                "kg",
            ),
            capacity_at_max_extension: MassValue::new(
                parse_decimal("capacity_at_max_extension", &self.capacity_at_max_extension_kg)?,
                "kg",
            ),
            operating_radius: LengthValue::new(
                parse_decimal("operating_radius", &self.operating_radius_m)?,
                "m",
            ),
            boom_extension: LengthValue::new(parse_decimal("boom_extension", &self.boom_extension_m)?, "m"),
            minimum_boom_angle: AngleValue::new(minimum_boom_angle, "deg"),
        })
    }
}

fn no_accessories() -> MassValue {
    MassValue::new(0.0, "kg")
}

/// Unit-tagged inputs for one lift evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftRequest {
    pub load_weight: MassValue,
    pub condition: EquipmentCondition,
    #[serde(default = "no_accessories")]
    pub accessory_weight: MassValue,
    #[serde(default)]
    pub crane_manufacturer: String,
    #[serde(default)]
    pub crane_model: String,
    pub capacity_at_radius: MassValue,
    pub capacity_at_max_extension: MassValue,
    pub operating_radius: LengthValue,
    pub boom_extension: LengthValue,
    pub minimum_boom_angle: AngleValue,
}

fn mass(field: &'static str, value: &MassValue) -> Result<Mass, LiftError> {
    value
        .to_mass()
        .map_err(|_| LiftError::invalid(field, &value.unit, "has an unknown mass unit"))
}

fn length(field: &'static str, value: &LengthValue) -> Result<Length, LiftError> {
    value
        .to_length()
        .map_err(|_| LiftError::invalid(field, &value.unit, "has an unknown length unit"))
}

impl LiftRequest {
    /// Typed crane figures, with the minimum boom angle held to the form
    /// bounds in `form`
    pub fn crane_setup(&self, form: &FormConfig) -> Result<CraneSetup, LiftError> {
        let minimum_boom_angle = self
            .minimum_boom_angle
            .to_angle()
            .map_err(|_| {
                LiftError::invalid(
                    "minimum_boom_angle",
                    &self.minimum_boom_angle.unit,
                    "has an unknown angle unit",
                )
            })?;

        let minimum_deg = deg(minimum_boom_angle);
        if !form.accepts_minimum_angle(minimum_deg) {
            return Err(LiftError::invalid(
                "minimum_boom_angle",
                minimum_deg,
                "is outside the accepted range",
            ));
        }

        Ok(CraneSetup {
            capacity_at_radius: mass("capacity_at_radius", &self.capacity_at_radius)?,
            capacity_at_max_extension: mass("capacity_at_max_extension", &self.capacity_at_max_extension)?,
            operating_radius: length("operating_radius", &self.operating_radius)?,
            boom_extension: length("boom_extension", &self.boom_extension)?,
            minimum_boom_angle,
        })
    }

    pub fn evaluate(&self, form: &FormConfig) -> Result<LiftEvaluation, LiftError> {
        let crane = self.crane_setup(form)?;

        LiftEvaluation::run(
            self.crane_manufacturer.clone(),
            self.crane_model.clone(),
            mass("raw_load_weight", &self.load_weight)?,
            self.condition,
            mass("accessory_weight", &self.accessory_weight)?,
            &crane,
        )
    }
}
