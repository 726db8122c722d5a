use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::documents::DocumentKind;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("Extraction response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Extraction response is not a JSON object")]
    NotAnObject,
}

/// Reads structured fields out of an uploaded document.
///
/// Implementations wrap whatever service does the reading (typically a
/// language model behind an HTTP API) and hand back the raw field values.
pub trait DocumentExtractor {
    fn extract(&self, kind: DocumentKind, document: &[u8]) -> Result<ExtractedFields, ExtractionError>;
}

impl DocumentKind {
    /// Field names an extractor is expected to return for this kind
    pub fn expected_fields(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::Cnh => &["nome", "numero_cnh", "validade", "cpf"],
            DocumentKind::Art => &["numero_art", "data_emissao"],
            DocumentKind::Nr11 => &["nome_operador", "numero_nr11", "data_emissao", "validade"],
            DocumentKind::Crlv => &["placa", "ano_fabricacao", "marca_modelo"],
            DocumentKind::Maintenance => &["data_manutencao", "proxima_manutencao"],
            DocumentKind::LoadChart => &[],
        }
    }
}

/// Field name → extracted text. Blank values are treated as not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct ExtractedFields(BTreeMap<String, String>);

impl From<BTreeMap<String, String>> for ExtractedFields {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut fields = Self::new();
        for (field, value) in map {
            fields.insert(field, value);
        }
        fields
    }
}

impl From<ExtractedFields> for BTreeMap<String, String> {
    fn from(fields: ExtractedFields) -> Self {
        fields.0
    }
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a service response: a bare JSON object, or one wrapped in a
    /// fenced code block with optional prose around it.
    pub fn from_response(text: &str) -> Result<Self, ExtractionError> {
        let value: Value = serde_json::from_str(json_payload(text))?;
        let Value::Object(map) = value else {
            return Err(ExtractionError::NotAnObject);
        };

        let mut fields = Self::new();
        for (key, value) in map {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                other => other.to_string(),
            };
            fields.insert(key, text);
        }
        Ok(fields)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.0.insert(field.into(), trimmed.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `YYYY-MM-DD` date; `None` when absent or malformed
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.get(field)
            .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
    }

    /// Expected fields for `kind` that the extractor did not fill in
    pub fn missing_fields(&self, kind: DocumentKind) -> Vec<&'static str> {
        kind.expected_fields()
            .iter()
            .copied()
            .filter(|field| self.get(field).is_none())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Strip a ```json fence if present
fn json_payload(text: &str) -> &str {
    let Some(start) = text.find("```") else {
        return text.trim();
    };
    let after_fence = &text[start + 3..];
    let body = after_fence
        .strip_prefix("json")
        .or_else(|| after_fence.strip_prefix("JSON"))
        .unwrap_or(after_fence);

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}
