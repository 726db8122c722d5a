use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationIdError {
    #[error("Malformed evaluation ID: {0}")]
    Malformed(String),
}

/// Opaque key tying together every row and document of one evaluation.
///
/// Format: `AV{YYYYMMDD}-{8 hex chars}`, e.g. `AV20240521-1a2b3c4d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EvaluationId(String);

impl EvaluationId {
    /// New ID dated today (local time)
    pub fn generate() -> Self {
        Self::generate_on(Local::now().date_naive())
    }

    pub fn generate_on(date: NaiveDate) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("AV{}-{}", date.format("%Y%m%d"), &suffix[..8]))
    }

    pub fn parse(text: &str) -> Result<Self, EvaluationIdError> {
        let text = text.trim();
        let malformed = || EvaluationIdError::Malformed(text.to_string());

        let rest = text.strip_prefix("AV").ok_or_else(malformed)?;
        let (date, suffix) = rest.split_once('-').ok_or_else(malformed)?;

        if date.len() != 8 || NaiveDate::parse_from_str(date, "%Y%m%d").is_err() {
            return Err(malformed());
        }
        if suffix.len() != 8 || !suffix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        Ok(Self(text.to_string()))
    }

    /// Day the evaluation was opened
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0[2..10], "%Y%m%d").ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EvaluationId {
    type Error = EvaluationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EvaluationId> for String {
    fn from(id: EvaluationId) -> Self {
        id.0
    }
}
