//! Compliance documents attached to an evaluation
//!
//! Operators upload a driving licence (CNH), a technical responsibility note
//! (ART), an NR-11 operator certificate, the vehicle registration (CRLV), the
//! latest preventive maintenance record and the crane's load chart. Each is
//! stored under a name derived from the evaluation ID, and the dated ones are
//! checked for expiry.

pub mod extraction;

pub use extraction::*;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::evaluation::EvaluationId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    #[error("Unknown document kind: {0}")]
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Operator's driving licence
    Cnh,
    /// Technical responsibility note
    Art,
    /// NR-11 operator training certificate
    Nr11,
    /// Vehicle registration
    Crlv,
    /// Preventive maintenance record
    Maintenance,
    /// Manufacturer load chart
    LoadChart,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::Cnh,
        DocumentKind::Art,
        DocumentKind::Nr11,
        DocumentKind::Crlv,
        DocumentKind::Maintenance,
        DocumentKind::LoadChart,
    ];

    /// Tag used in stored file names
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Cnh => "cnh_doc",
            DocumentKind::Art => "art_doc",
            DocumentKind::Nr11 => "nr11_doc",
            DocumentKind::Crlv => "crlv",
            DocumentKind::Maintenance => "mprev_doc",
            DocumentKind::LoadChart => "grafico_doc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Cnh => "CNH",
            DocumentKind::Art => "ART",
            DocumentKind::Nr11 => "NR-11 certificate",
            DocumentKind::Crlv => "CRLV",
            DocumentKind::Maintenance => "Preventive maintenance",
            DocumentKind::LoadChart => "Load chart",
        }
    }

    /// Name under which an upload is stored: `{id}_{slug}.{ext}`.
    ///
    /// The extension of the uploaded file is kept (lowercased); files
    /// without one are assumed to be PDFs.
    pub fn stored_file_name(&self, id: &EvaluationId, original_name: &str) -> String {
        let extension = std::path::Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "pdf".to_string());

        format!("{}_{}.{}", id, self.slug(), extension)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| DocumentError::UnknownKind(s.to_string()))
    }
}

/// `date` moved forward by a renewal period. `None` only on calendar overflow.
pub fn renewal_date(date: NaiveDate, renewal_months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(renewal_months))
}

/// Expiry of an NR-11 certificate: the printed validity when there is one,
/// otherwise one renewal period after issue.
pub fn nr11_expiry(
    issued_on: Option<NaiveDate>,
    valid_until: Option<NaiveDate>,
    renewal_months: u32,
) -> Option<NaiveDate> {
    valid_until.or_else(|| issued_on.and_then(|issued| renewal_date(issued, renewal_months)))
}

/// Due date of the next preventive maintenance
pub fn next_maintenance(last_maintenance: NaiveDate, renewal_months: u32) -> Option<NaiveDate> {
    renewal_date(last_maintenance, renewal_months)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Valid { until: NaiveDate },
    Expired { since: NaiveDate },
    Missing,
}

impl DocumentStatus {
    /// A document is still valid on its expiry date
    pub fn evaluate(expires_on: Option<NaiveDate>, today: NaiveDate) -> Self {
        match expires_on {
            Some(until) if until >= today => DocumentStatus::Valid { until },
            Some(since) => DocumentStatus::Expired { since },
            None => DocumentStatus::Missing,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, DocumentStatus::Valid { .. })
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Valid { until } => write!(f, "Valid until {}", until.format("%d/%m/%Y")),
            DocumentStatus::Expired { since } => write!(f, "Expired on {}", since.format("%d/%m/%Y")),
            DocumentStatus::Missing => write!(f, "No validity date"),
        }
    }
}
