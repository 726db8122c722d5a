use chrono::Local;
use lift_core::config::AppConfig;
use lift_core::documents::{DocumentKind, ExtractedFields};
use lift_core::evaluation::{CsvStore, EquipmentRecord, EvaluationStore, LiftingRecord};
use lift_core::types::*;
use lift_core::{EvaluationId, LiftForm};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    // What a calculation form would post
    let form = LiftForm {
        load_weight_kg: "2000".into(),
        is_new_equipment: true,
        accessory_weight_kg: "100".into(),
        crane_manufacturer: "Liebherr".into(),
        crane_model: "LTM 1060-3.1".into(),
        capacity_at_radius_kg: "6500".into(),
        capacity_at_max_extension_kg: "4200".into(),
        operating_radius_m: "8".into(),
        boom_extension_m: "16".into(),
        minimum_boom_angle_deg: "45".into(),
    };

    let evaluation = form.to_request(&config.form)?.evaluate(&config.form)?;
    evaluation.print();

    if let Some(diagram) = evaluation.diagram() {
        println!(
            "Boom tip at {} out, {} up",
            DisplayLength(diagram.hook_radius()),
            DisplayLength(diagram.tip_height())
        );
    }

    let id = EvaluationId::generate();
    let mut store = CsvStore::open(&config.store)?;
    store.append_lifting(&LiftingRecord::from_evaluation(
        &id,
        &evaluation,
        Local::now().naive_local(),
    ))?;

    // Fields an extraction service would return for the operator's NR-11
    let nr11 = ExtractedFields::from_response(
        r#"{"nome_operador": "Maria Souza", "numero_nr11": "NR11-4471", "data_emissao": "2025-03-10"}"#,
    )?;
    let mut equipment = EquipmentRecord::new(id.clone());
    equipment.company = "Içamentos Exemplo Ltda".into();
    equipment.apply_extracted(DocumentKind::Nr11, &nr11, config.documents.renewal_months);
    equipment.set_document_url(
        DocumentKind::Nr11,
        DocumentKind::Nr11.stored_file_name(&id, "certificado.PDF"),
    );
    store.append_equipment(&equipment)?;

    println!("\nStored evaluation {}", id);
    for (kind, status) in equipment.document_statuses(Local::now().date_naive()) {
        println!("  {}: {}", kind.label(), status);
    }

    Ok(())
}
