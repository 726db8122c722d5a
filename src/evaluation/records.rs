//! Flat rows persisted for each evaluation
//!
//! Column order follows field order. Quantities are written in the internal
//! units (kilograms, meters, degrees) with the unit in the column name.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::documents::{DocumentKind, DocumentStatus, ExtractedFields, next_maintenance, nr11_expiry};
use crate::evaluation::{EvaluationId, LiftEvaluation};
use crate::types::*;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the lifting sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftingRecord {
    pub id: EvaluationId,
    pub recorded_at: String,
    pub load_weight_kg: f64,
    pub safety_margin_pct: f64,
    pub margin_weight_kg: f64,
    pub cable_weight_kg: f64,
    pub accessory_weight_kg: f64,
    pub total_load_kg: f64,
    pub adequate: bool,
    pub radius_utilization: String,
    pub extension_utilization: String,
    pub crane_manufacturer: String,
    pub crane_model: String,
    pub operating_radius_m: f64,
    pub capacity_at_radius_kg: f64,
    pub boom_extension_m: f64,
    pub capacity_at_extension_kg: f64,
    pub minimum_boom_angle_deg: f64,
    pub boom_angle_deg: f64,
    pub safety_tier: String,
}

impl LiftingRecord {
    pub fn from_evaluation(id: &EvaluationId, evaluation: &LiftEvaluation, recorded_at: NaiveDateTime) -> Self {
        let load = &evaluation.load;
        let details = &evaluation.validation.details;
        let crane = &details.crane;

        Self {
            id: id.clone(),
            recorded_at: recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            load_weight_kg: kg(load.raw_load_weight),
            safety_margin_pct: load.safety_margin_percent(),
            margin_weight_kg: kg(load.margin_weight),
            cable_weight_kg: kg(load.rigging_cable_weight),
            accessory_weight_kg: kg(load.accessory_weight),
            total_load_kg: kg(load.total_load),
            adequate: evaluation.validation.is_adequate,
            radius_utilization: format!("{:.1}%", details.radius_utilization_pct),
            extension_utilization: format!("{:.1}%", details.extension_utilization_pct),
            crane_manufacturer: evaluation.crane_manufacturer.clone(),
            crane_model: evaluation.crane_model.clone(),
            operating_radius_m: m(crane.operating_radius),
            capacity_at_radius_kg: kg(crane.capacity_at_radius),
            boom_extension_m: m(crane.boom_extension),
            capacity_at_extension_kg: kg(crane.capacity_at_max_extension),
            minimum_boom_angle_deg: deg(crane.minimum_boom_angle),
            boom_angle_deg: deg(details.boom_angle),
            safety_tier: evaluation.validation.tier.to_string(),
        }
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.recorded_at, TIMESTAMP_FORMAT).ok()
    }
}

/// One row of the equipment sheet: company, operator, vehicle and the
/// compliance documents attached to the evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: EvaluationId,
    pub company: String,
    pub cnpj: String,
    pub phone: String,
    pub email: String,
    pub operator_name: String,
    pub cpf: String,
    pub cnh_number: String,
    pub cnh_valid_until: Option<NaiveDate>,
    pub nr11_number: String,
    pub nr11_issued_on: Option<NaiveDate>,
    pub nr11_valid_until: Option<NaiveDate>,
    pub plate: String,
    pub vehicle_model: String,
    pub vehicle_manufacturer: String,
    pub manufacture_year: String,
    pub maintenance_date: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub art_number: String,
    pub art_issued_on: Option<NaiveDate>,
    pub notes: String,
    pub art_doc_url: String,
    pub nr11_doc_url: String,
    pub cnh_doc_url: String,
    pub crlv_url: String,
    pub maintenance_doc_url: String,
    pub load_chart_url: String,
}

impl EquipmentRecord {
    pub fn new(id: EvaluationId) -> Self {
        Self {
            id,
            company: String::new(),
            cnpj: String::new(),
            phone: String::new(),
            email: String::new(),
            operator_name: String::new(),
            cpf: String::new(),
            cnh_number: String::new(),
            cnh_valid_until: None,
            nr11_number: String::new(),
            nr11_issued_on: None,
            nr11_valid_until: None,
            plate: String::new(),
            vehicle_model: String::new(),
            vehicle_manufacturer: String::new(),
            manufacture_year: String::new(),
            maintenance_date: None,
            next_maintenance: None,
            art_number: String::new(),
            art_issued_on: None,
            notes: String::new(),
            art_doc_url: String::new(),
            nr11_doc_url: String::new(),
            cnh_doc_url: String::new(),
            crlv_url: String::new(),
            maintenance_doc_url: String::new(),
            load_chart_url: String::new(),
        }
    }

    fn url_slot(&mut self, kind: DocumentKind) -> &mut String {
        match kind {
            DocumentKind::Art => &mut self.art_doc_url,
            DocumentKind::Nr11 => &mut self.nr11_doc_url,
            DocumentKind::Cnh => &mut self.cnh_doc_url,
            DocumentKind::Crlv => &mut self.crlv_url,
            DocumentKind::Maintenance => &mut self.maintenance_doc_url,
            DocumentKind::LoadChart => &mut self.load_chart_url,
        }
    }

    pub fn set_document_url(&mut self, kind: DocumentKind, url: impl Into<String>) {
        *self.url_slot(kind) = url.into();
    }

    pub fn document_url(&self, kind: DocumentKind) -> Option<&str> {
        let url = match kind {
            DocumentKind::Art => &self.art_doc_url,
            DocumentKind::Nr11 => &self.nr11_doc_url,
            DocumentKind::Cnh => &self.cnh_doc_url,
            DocumentKind::Crlv => &self.crlv_url,
            DocumentKind::Maintenance => &self.maintenance_doc_url,
            DocumentKind::LoadChart => &self.load_chart_url,
        };
        Some(url.as_str()).filter(|u| !u.is_empty())
    }

    /// Copy extracted fields into the record. Fields the extractor left out
    /// keep their current value. Expiry and next-maintenance dates are
    /// recomputed from each new document.
    pub fn apply_extracted(&mut self, kind: DocumentKind, fields: &ExtractedFields, renewal_months: u32) {
        fn set_text(slot: &mut String, value: Option<&str>) {
            if let Some(value) = value {
                *slot = value.to_string();
            }
        }
        fn set_date(slot: &mut Option<NaiveDate>, value: Option<NaiveDate>) {
            if value.is_some() {
                *slot = value;
            }
        }

        match kind {
            DocumentKind::Cnh => {
                set_text(&mut self.operator_name, fields.get("nome"));
                set_text(&mut self.cnh_number, fields.get("numero_cnh"));
                set_text(&mut self.cpf, fields.get("cpf"));
                set_date(&mut self.cnh_valid_until, fields.date("validade"));
            }
            DocumentKind::Crlv => {
                set_text(&mut self.plate, fields.get("placa"));
                set_text(&mut self.manufacture_year, fields.get("ano_fabricacao"));
                set_text(&mut self.vehicle_model, fields.get("marca_modelo"));
            }
            DocumentKind::Art => {
                set_text(&mut self.art_number, fields.get("numero_art"));
                set_date(&mut self.art_issued_on, fields.date("data_emissao"));
            }
            DocumentKind::Nr11 => {
                set_text(&mut self.operator_name, fields.get("nome_operador"));
                set_text(&mut self.nr11_number, fields.get("numero_nr11"));
                set_date(&mut self.nr11_issued_on, fields.date("data_emissao"));
                self.nr11_valid_until = nr11_expiry(self.nr11_issued_on, fields.date("validade"), renewal_months);
            }
            DocumentKind::Maintenance => {
                set_date(&mut self.maintenance_date, fields.date("data_manutencao"));
                if let Some(last) = self.maintenance_date {
                    self.next_maintenance = fields
                        .date("proxima_manutencao")
                        .or_else(|| next_maintenance(last, renewal_months));
                } else {
                    set_date(&mut self.next_maintenance, fields.date("proxima_manutencao"));
                }
            }
            DocumentKind::LoadChart => {}
        }
    }

    /// Expiry status of the dated documents
    pub fn document_statuses(&self, today: NaiveDate) -> Vec<(DocumentKind, DocumentStatus)> {
        vec![
            (DocumentKind::Cnh, DocumentStatus::evaluate(self.cnh_valid_until, today)),
            (DocumentKind::Nr11, DocumentStatus::evaluate(self.nr11_valid_until, today)),
            (
                DocumentKind::Maintenance,
                DocumentStatus::evaluate(self.next_maintenance, today),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{CraneSetup, EquipmentCondition};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_id() -> EvaluationId {
        EvaluationId::parse("AV20240521-1a2b3c4d").unwrap()
    }

    #[test]
    fn test_lifting_record_from_evaluation() {
        let crane = CraneSetup {
            capacity_at_radius: Weight::new::<kilogram>(3000.0),
            capacity_at_max_extension: Weight::new::<kilogram>(2800.0),
            operating_radius: Distance::new::<meter>(8.0),
            boom_extension: Distance::new::<meter>(16.0),
            minimum_boom_angle: BoomAngle::new::<degree>(30.0),
        };
        let evaluation = LiftEvaluation::run(
            "Grove",
            "RT540E",
            Weight::new::<kilogram>(1000.0),
            EquipmentCondition::New,
            Weight::new::<kilogram>(0.0),
            &crane,
        )
        .unwrap();
        let at = date(2024, 5, 21).and_hms_opt(14, 30, 0).unwrap();

        let record = LiftingRecord::from_evaluation(&test_id(), &evaluation, at);

        assert_eq!(record.recorded_at, "2024-05-21 14:30:00");
        assert_eq!(record.recorded_at(), Some(at));
        assert_eq!(record.safety_margin_pct, 10.0);
        assert!((record.total_load_kg - 1133.0).abs() < 1e-9);
        assert!(record.adequate);
        assert_eq!(record.radius_utilization, "37.8%");
        assert_eq!(record.extension_utilization, "40.5%");
        assert_eq!(record.safety_tier, "SAFE");
        assert_eq!(record.crane_model, "RT540E");
    }

    #[test]
    fn test_document_urls() {
        let mut record = EquipmentRecord::new(test_id());
        assert_eq!(record.document_url(DocumentKind::Crlv), None);

        record.set_document_url(DocumentKind::Crlv, "https://files.example/crlv.pdf");
        assert_eq!(
            record.document_url(DocumentKind::Crlv),
            Some("https://files.example/crlv.pdf")
        );
        assert_eq!(record.document_url(DocumentKind::Art), None);
    }

    #[test]
    fn test_apply_nr11_derives_expiry() {
        let mut record = EquipmentRecord::new(test_id());
        let mut fields = ExtractedFields::new();
        fields.insert("nome_operador", "João da Silva");
        fields.insert("numero_nr11", "NR1120241234");
        fields.insert("data_emissao", "2024-05-21");

        record.apply_extracted(DocumentKind::Nr11, &fields, 12);

        assert_eq!(record.operator_name, "João da Silva");
        assert_eq!(record.nr11_issued_on, Some(date(2024, 5, 21)));
        assert_eq!(record.nr11_valid_until, Some(date(2025, 5, 21)));
    }

    #[test]
    fn test_apply_keeps_existing_values() {
        let mut record = EquipmentRecord::new(test_id());
        record.plate = "XYZ9K88".into();

        let mut fields = ExtractedFields::new();
        fields.insert("ano_fabricacao", "2022");
        fields.insert("placa", "  ");
        record.apply_extracted(DocumentKind::Crlv, &fields, 12);

        assert_eq!(record.plate, "XYZ9K88");
        assert_eq!(record.manufacture_year, "2022");
    }

    #[test]
    fn test_maintenance_statuses() {
        let mut record = EquipmentRecord::new(test_id());
        let mut fields = ExtractedFields::new();
        fields.insert("data_manutencao", "2024-01-10");
        record.apply_extracted(DocumentKind::Maintenance, &fields, 12);

        assert_eq!(record.next_maintenance, Some(date(2025, 1, 10)));

        let statuses = record.document_statuses(date(2025, 3, 1));
        assert_eq!(statuses[0], (DocumentKind::Cnh, DocumentStatus::Missing));
        assert_eq!(
            statuses[2],
            (DocumentKind::Maintenance, DocumentStatus::Expired { since: date(2025, 1, 10) })
        );
    }

    #[test]
    fn test_newer_nr11_replaces_derived_expiry() {
        let mut record = EquipmentRecord::new(test_id());

        let mut first = ExtractedFields::new();
        first.insert("data_emissao", "2023-01-01");
        record.apply_extracted(DocumentKind::Nr11, &first, 12);
        assert_eq!(record.nr11_valid_until, Some(date(2024, 1, 1)));

        let mut renewed = ExtractedFields::new();
        renewed.insert("data_emissao", "2024-06-01");
        record.apply_extracted(DocumentKind::Nr11, &renewed, 12);

        assert_eq!(record.nr11_issued_on, Some(date(2024, 6, 1)));
        assert_eq!(record.nr11_valid_until, Some(date(2025, 6, 1)));
        assert!(record.document_statuses(date(2024, 9, 1))[1].1.is_valid());

        let mut printed = ExtractedFields::new();
        printed.insert("data_emissao", "2024-06-01");
        printed.insert("validade", "2026-06-01");
        record.apply_extracted(DocumentKind::Nr11, &printed, 12);
        assert_eq!(record.nr11_valid_until, Some(date(2026, 6, 1)));
    }

    #[test]
    fn test_newer_maintenance_replaces_next_date() {
        let mut record = EquipmentRecord::new(test_id());

        let mut first = ExtractedFields::new();
        first.insert("data_manutencao", "2023-01-10");
        record.apply_extracted(DocumentKind::Maintenance, &first, 12);
        assert_eq!(record.next_maintenance, Some(date(2024, 1, 10)));

        let mut latest = ExtractedFields::new();
        latest.insert("data_manutencao", "2024-09-10");
        record.apply_extracted(DocumentKind::Maintenance, &latest, 12);

        assert_eq!(record.maintenance_date, Some(date(2024, 9, 10)));
        assert_eq!(record.next_maintenance, Some(date(2025, 9, 10)));
        assert_eq!(
            record.document_statuses(date(2024, 12, 1))[2].1,
            DocumentStatus::Valid { until: date(2025, 9, 10) }
        );
    }
}
