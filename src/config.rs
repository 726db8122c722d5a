//! Application configuration, read from TOML.
//!
//! Only workflow settings live here. The safety margins, the cable
//! allowance, the attention band and the utilization limit are fixed in
//! [`crate::calculation`] and cannot be overridden.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub form: FormConfig,
    pub documents: DocumentConfig,
}

/// Where evaluation rows are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub directory: PathBuf,

    /// Sheet holding one row per lift calculation
    pub lifting_sheet: String,

    /// Sheet holding operator, equipment and document data
    pub equipment_sheet: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            lifting_sheet: "lifting_data".into(),
            equipment_sheet: "crane_info".into(),
        }
    }
}

/// Bounds applied to raw form input before it reaches the calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Pre-filled minimum boom angle, degrees
    pub default_minimum_boom_angle_deg: f64,

    /// Lowest minimum boom angle a form may submit, degrees
    pub minimum_boom_angle_floor_deg: f64,

    /// Highest minimum boom angle a form may submit, degrees
    pub minimum_boom_angle_ceiling_deg: f64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_minimum_boom_angle_deg: 30.0,
            minimum_boom_angle_floor_deg: 1.0,
            minimum_boom_angle_ceiling_deg: 89.0,
        }
    }
}

impl FormConfig {
    pub fn accepts_minimum_angle(&self, degrees: f64) -> bool {
        degrees >= self.minimum_boom_angle_floor_deg && degrees <= self.minimum_boom_angle_ceiling_deg
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Validity of NR-11 certificates and maintenance intervals, months
    pub renewal_months: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self { renewal_months: 12 }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let form = &self.form;
        let floor = form.minimum_boom_angle_floor_deg;
        let ceiling = form.minimum_boom_angle_ceiling_deg;

        if !(floor > 0.0 && ceiling < 90.0 && floor <= ceiling) {
            return Err(ConfigError::Invalid(format!(
                "minimum boom angle bounds must satisfy 0 < floor <= ceiling < 90, got {}..{}",
                floor, ceiling
            )));
        }
        if !form.accepts_minimum_angle(form.default_minimum_boom_angle_deg) {
            return Err(ConfigError::Invalid(format!(
                "default minimum boom angle {} is outside {}..{}",
                form.default_minimum_boom_angle_deg, floor, ceiling
            )));
        }
        if self.documents.renewal_months == 0 {
            return Err(ConfigError::Invalid("renewal_months must be at least 1".into()));
        }
        if self.store.lifting_sheet.trim().is_empty() || self.store.equipment_sheet.trim().is_empty() {
            return Err(ConfigError::Invalid("sheet names must not be empty".into()));
        }
        if self.store.lifting_sheet == self.store.equipment_sheet {
            return Err(ConfigError::Invalid("lifting and equipment sheets must differ".into()));
        }

        Ok(())
    }
}
