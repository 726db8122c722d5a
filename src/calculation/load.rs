//! Total suspended load calculation
//!
//! The nominal load is raised by a safety margin that depends on the age of
//! the equipment, then by a fixed allowance for the crane's own lifting
//! cables. Slings, shackles and other accessories are added on top.

use log::info;
use serde::{Deserialize, Serialize};

use crate::calculation::{AUDIT_TARGET, LiftError, require_non_negative, require_positive};
use crate::types::*;

/// Safety margin applied to new equipment
pub const NEW_EQUIPMENT_MARGIN: f64 = 0.10;

/// Safety margin applied to used equipment
pub const USED_EQUIPMENT_MARGIN: f64 = 0.25;

/// Weight of the crane's lifting cables, as a fraction of the adjusted load
pub const RIGGING_CABLE_ALLOWANCE: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCondition {
    New,
    Used,
}

impl EquipmentCondition {
    pub fn from_is_new(is_new_equipment: bool) -> Self {
        if is_new_equipment {
            EquipmentCondition::New
        } else {
            EquipmentCondition::Used
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, EquipmentCondition::New)
    }

    /// Fixed business policy, not configurable
    pub fn safety_margin_fraction(&self) -> f64 {
        match self {
            EquipmentCondition::New => NEW_EQUIPMENT_MARGIN,
            EquipmentCondition::Used => USED_EQUIPMENT_MARGIN,
        }
    }
}

/// Every intermediate figure of a load calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadBreakdown {
    /// Nominal weight of the object being lifted
    pub raw_load_weight: Weight,

    pub condition: EquipmentCondition,

    /// raw_load_weight × safety margin
    pub margin_weight: Weight,

    /// raw_load_weight + margin_weight
    pub adjusted_weight: Weight,

    /// adjusted_weight × 3%
    pub rigging_cable_weight: Weight,

    /// Slings, shackles, spreader bars
    pub accessory_weight: Weight,

    /// adjusted + accessories + cables
    pub total_load: Weight,
}

impl LoadBreakdown {
    pub fn is_new_equipment(&self) -> bool {
        self.condition.is_new()
    }

    pub fn safety_margin_fraction(&self) -> f64 {
        self.condition.safety_margin_fraction()
    }

    pub fn safety_margin_percent(&self) -> f64 {
        self.safety_margin_fraction() * 100.0
    }
}

/// Compute the total load the crane must carry.
///
/// Fails with [`LiftError::InvalidInput`] when the load weight is not
/// positive or the accessory weight is negative.
pub fn compute_total_load(
    raw_load_weight: Weight,
    condition: EquipmentCondition,
    accessory_weight: Weight,
) -> Result<LoadBreakdown, LiftError> {
    let raw_kg = require_positive("raw_load_weight", kg(raw_load_weight))?;
    let accessory_kg = require_non_negative("accessory_weight", kg(accessory_weight))?;

    let margin_weight = raw_load_weight * condition.safety_margin_fraction();
    let adjusted_weight = raw_load_weight + margin_weight;
    let rigging_cable_weight = adjusted_weight * RIGGING_CABLE_ALLOWANCE;
    let total_load = adjusted_weight + accessory_weight + rigging_cable_weight;

    info!(
        target: AUDIT_TARGET,
        "load calculated: raw={:.2} kg condition={:?} accessories={:.2} kg total={:.2} kg",
        raw_kg,
        condition,
        accessory_kg,
        kg(total_load),
    );

    Ok(LoadBreakdown {
        raw_load_weight,
        condition,
        margin_weight,
        adjusted_weight,
        rigging_cable_weight,
        accessory_weight,
        total_load,
    })
}
