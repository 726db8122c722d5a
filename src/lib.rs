pub mod types;
pub mod calculation;
pub mod evaluation;
pub mod documents;
pub mod diagram;
pub mod config;

pub use types::*;
pub use calculation::{
    CraneSetup, EquipmentCondition, LiftError, LoadBreakdown, SafetyTier, ValidationResult,
    compute_total_load, validate_crane,
};
pub use evaluation::{EvaluationId, LiftEvaluation, LiftForm, LiftRequest};
