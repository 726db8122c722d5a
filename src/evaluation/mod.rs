//! One lift evaluation from inputs to stored rows
//!
//! [`LiftEvaluation::run`] chains the two calculation steps and keeps the
//! crane identification alongside the results so the evaluation can be
//! printed, exported or flattened into [`records`] for the [`store`].

pub mod id;
pub mod records;
pub mod request;
pub mod store;

pub use id::*;
pub use records::*;
pub use request::*;
pub use store::*;

use serde::{Deserialize, Serialize};

use crate::calculation::{
    CraneSetup, EquipmentCondition, LiftError, LoadBreakdown, SafetyTier, ValidationResult,
    compute_total_load,
};
use crate::diagram::LiftDiagram;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftEvaluation {
    pub crane_manufacturer: String,
    pub crane_model: String,
    pub load: LoadBreakdown,
    pub validation: ValidationResult,
}

impl LiftEvaluation {
    /// Compute the total load, then validate the crane against it
    pub fn run(
        crane_manufacturer: impl Into<String>,
        crane_model: impl Into<String>,
        raw_load_weight: Weight,
        condition: EquipmentCondition,
        accessory_weight: Weight,
        crane: &CraneSetup,
    ) -> Result<Self, LiftError> {
        let load = compute_total_load(raw_load_weight, condition, accessory_weight)?;
        let validation = crane.validate(load.total_load)?;

        Ok(Self {
            crane_manufacturer: crane_manufacturer.into(),
            crane_model: crane_model.into(),
            load,
            validation,
        })
    }

    pub fn is_adequate(&self) -> bool {
        self.validation.is_adequate
    }

    pub fn tier(&self) -> SafetyTier {
        self.validation.tier
    }

    pub fn crane(&self) -> &CraneSetup {
        &self.validation.details.crane
    }

    pub fn diagram(&self) -> Option<LiftDiagram> {
        let crane = self.crane();
        LiftDiagram::new(
            crane.operating_radius,
            crane.boom_extension,
            self.load.total_load,
            crane.capacity_at_radius,
            crane.minimum_boom_angle,
        )
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn print(&self) {
        println!("\n╔════════════════════════════════════════════╗");
        println!("║          LIFT EVALUATION REPORT            ║");
        println!("╚════════════════════════════════════════════╝\n");

        if !self.crane_manufacturer.is_empty() || !self.crane_model.is_empty() {
            println!("Crane: {} {}\n", self.crane_manufacturer, self.crane_model);
        }

        let load = &self.load;
        println!("Load Breakdown:");
        println!("{}", "─".repeat(50));
        println!("  Load weight:       {}", DisplayMass(load.raw_load_weight));
        println!(
            "  Safety margin:     {} ({:.0}%, {} equipment)",
            DisplayMass(load.margin_weight),
            load.safety_margin_percent(),
            if load.is_new_equipment() { "new" } else { "used" }
        );
        println!("  Rigging cables:    {}", DisplayMass(load.rigging_cable_weight));
        println!("  Accessories:       {}", DisplayMass(load.accessory_weight));
        println!("  Total load:        {}", DisplayMass(load.total_load));

        let details = &self.validation.details;
        let crane = &details.crane;
        println!("\nCrane Configuration:");
        println!("{}", "─".repeat(50));
        println!(
            "  Radius / boom:     {} / {}",
            DisplayLength(crane.operating_radius),
            DisplayLength(crane.boom_extension)
        );
        println!(
            "  Boom angle:        {} (minimum {})",
            DisplayAngle(details.boom_angle),
            DisplayAngle(crane.minimum_boom_angle)
        );
        println!(
            "  At radius:         {:.1}% of {}",
            details.radius_utilization_pct,
            DisplayMass(crane.capacity_at_radius)
        );
        println!(
            "  At max extension:  {:.1}% of {}",
            details.extension_utilization_pct,
            DisplayMass(crane.capacity_at_max_extension)
        );

        let status_symbol = match self.validation.tier {
            SafetyTier::Safe => "✅",
            SafetyTier::Attention => "⚠️",
            SafetyTier::Unsafe => "❌",
        };
        println!("\n{} {}", status_symbol, self.validation.tier);
        println!("   {}", self.validation.message);

        println!("\n{}", "═".repeat(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crane(capacity_kg: f64) -> CraneSetup {
        CraneSetup {
            capacity_at_radius: Weight::new::<kilogram>(capacity_kg),
            capacity_at_max_extension: Weight::new::<kilogram>(capacity_kg),
            operating_radius: Distance::new::<meter>(10.0),
            boom_extension: Distance::new::<meter>(20.0),
            minimum_boom_angle: BoomAngle::new::<degree>(45.0),
        }
    }

    #[test]
    fn test_run_chains_both_steps() {
        let evaluation = LiftEvaluation::run(
            "Liebherr",
            "LTM 1100",
            Weight::new::<kilogram>(1000.0),
            EquipmentCondition::Used,
            Weight::new::<kilogram>(0.0),
            &crane(10_000.0),
        )
        .unwrap();

        assert_relative_eq!(kg(evaluation.load.total_load), 1287.5, epsilon = 1e-9);
        assert_relative_eq!(kg(evaluation.validation.details.total_load), 1287.5, epsilon = 1e-9);
        assert_eq!(evaluation.tier(), SafetyTier::Safe);
        assert!(evaluation.is_adequate());
        assert_eq!(evaluation.crane(), &crane(10_000.0));
    }

    #[test]
    fn test_run_surfaces_load_errors_first() {
        let err = LiftEvaluation::run(
            "",
            "",
            Weight::new::<kilogram>(-1.0),
            EquipmentCondition::New,
            Weight::new::<kilogram>(0.0),
            &crane(0.0),
        )
        .unwrap_err();

        assert_eq!(err.field(), Some("raw_load_weight"));
    }

    #[test]
    fn test_json_export() {
        let evaluation = LiftEvaluation::run(
            "Grove",
            "RT540E",
            Weight::new::<kilogram>(1000.0),
            EquipmentCondition::New,
            Weight::new::<kilogram>(0.0),
            &crane(2000.0),
        )
        .unwrap();

        let json = evaluation.to_json().unwrap();
        assert!(json.contains("\"tier\": \"safe\""));

        let back: LiftEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tier(), evaluation.tier());
        assert_eq!(back.crane_model, "RT540E");
    }

    #[test]
    fn test_diagram_follows_the_crane() {
        let evaluation = LiftEvaluation::run(
            "",
            "",
            Weight::new::<kilogram>(1000.0),
            EquipmentCondition::New,
            Weight::new::<kilogram>(0.0),
            &crane(2000.0),
        )
        .unwrap();

        let diagram = evaluation.diagram().unwrap();
        assert_relative_eq!(diagram.boom_tip.x, 10.0, epsilon = 1e-9);
        assert!(!diagram.boom_in_risk_zone);
    }
}
