//! End-to-end rendering: one report through both renderers.

use sim_core::types::{Incident, IncidentReport};
use sim_core::{map, report};
use std::fs;

fn bogota_report() -> IncidentReport {
    IncidentReport {
        summary: "Dos incidentes activos en Bogotá".to_string(),
        incidents: vec![
            Incident {
                address: "Calle 26 # 68-35".into(),
                description: "Colisión múltiple".into(),
                severity: "Alta".into(),
            },
            Incident {
                address: "Avenida Caracas".into(),
                description: "Manifestación".into(),
                severity: "Media".into(),
            },
        ],
    }
}

#[test]
fn pdf_and_map_agree_on_incident_order() {
    let dir = tempfile::tempdir().unwrap();
    let report_data = bogota_report();

    let pdf_path = dir.path().join("Reporte_Bogota.pdf");
    report::write_pdf(&pdf_path, "Bogota", &report_data).unwrap();
    assert!(pdf_path.metadata().unwrap().len() > 0);

    let map_path = dir.path().join(map::MAP_FILE_NAME);
    map::write_map(&map_path, "Bogota", &report_data.incidents).unwrap();
    let html = fs::read_to_string(&map_path).unwrap();

    // Marker data is emitted in report order: the "Alta" incident first
    // (alert color), the "Media" one second (caution color).
    let alta = html.find(r#""gravedad":"Alta""#).unwrap();
    let media = html.find(r#""gravedad":"Media""#).unwrap();
    assert!(alta < media);
    assert!(html.contains(map::ALERT_COLOR));
    assert!(html.contains(map::CAUTION_COLOR));
}

#[test]
fn rerun_for_same_city_overwrites_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let report_data = bogota_report();

    for _ in 0..2 {
        report::write_pdf(&dir.path().join("Reporte_Bogota.pdf"), "Bogota", &report_data).unwrap();
        map::write_map(&dir.path().join(map::MAP_FILE_NAME), "Bogota", &report_data.incidents)
            .unwrap();
    }

    assert_eq!(dir.path().read_dir().unwrap().count(), 2);
}
