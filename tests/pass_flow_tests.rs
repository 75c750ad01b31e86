//! Integrationstests für den kompletten Import-Durchlauf auf einer
//! Registry aus `tests/fixtures/simple_run.json`.

mod common;

use common::RecordingHost;
use pcf_piping_importer::{
    BuildOptions, BuildPass, ElementRegistry, ElementType, ModelEntity, OutcomeStatus, Schedule,
    SystemTypeId,
};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/simple_run.json")
}

fn load_fixture() -> ElementRegistry {
    ElementRegistry::load_from_file(&fixture_path()).expect("Fixture muss ladbar sein")
}

#[test]
fn test_fixture_wird_vollstaendig_geladen() {
    let registry = load_fixture();

    assert_eq!(registry.len(), 6);
    let types: Vec<&str> = registry.iter().map(|e| e.element_type.tag()).collect();
    assert_eq!(types, vec!["PIPE", "ELBOW", "PIPE", "TEE", "FLANGE", "PIPE"]);
    assert_eq!(
        registry.by_position(5).map(|e| &e.element_type),
        Some(&ElementType::NotImplemented("FLANGE".to_string()))
    );
    assert_eq!(
        registry.by_position(6).and_then(|e| e.piping_system),
        Some(SystemTypeId(7))
    );
    assert_eq!(registry.by_position(1).map(|e| e.source_data.len()), Some(3));
    assert!(registry.iter().all(|e| e.created_entity().is_none()));
}

#[test]
fn test_fehlende_datei_liefert_fehler() {
    let result = ElementRegistry::load_from_file(&fixture_path().with_file_name("fehlt.json"));
    assert!(result.is_err());
}

#[test]
fn test_durchlauf_in_dateireihenfolge() {
    let registry = load_fixture();
    let options = BuildOptions::default();
    let mut host = RecordingHost::seeded();

    let report = BuildPass::new(&mut host, &options).run(&registry);

    assert_eq!(report.len(), 6);
    assert_eq!(report.succeeded(), 5);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(
        report.outcome_for(5).map(|o| o.status),
        Some(OutcomeStatus::Skipped)
    );

    // Zweiter Bogen-Nachbar existiert noch nicht → genau ein Platzhalter
    let placeholders = host.placeholder_ids(&registry);
    assert_eq!(placeholders.len(), 1);
    assert_eq!(host.deleted, placeholders);

    assert_eq!(host.inner.segment_count(), 3);
    assert_eq!(host.inner.fitting_count(), 1);
    assert_eq!(host.inner.instance_count(), 1);

    let positions: Vec<u32> = report.outcomes().iter().map(|o| o.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_durchlauf_segmente_zuerst_ohne_platzhalter() {
    let registry = load_fixture();
    let options = BuildOptions {
        schedule: Schedule::SegmentsFirst,
        ..Default::default()
    };
    let mut host = RecordingHost::seeded();

    let report = BuildPass::new(&mut host, &options).run(&registry);

    assert_eq!(report.succeeded(), 5);
    assert_eq!(report.failed(), 0);
    assert!(host.placeholder_ids(&registry).is_empty());
    assert!(host.deleted.is_empty());

    let positions: Vec<u32> = report.outcomes().iter().map(|o| o.position).collect();
    assert_eq!(positions, vec![1, 3, 6, 2, 4, 5]);

    // Bogen verbindet die beiden angrenzenden Rohre direkt
    let elbow = registry
        .by_position(2)
        .and_then(|e| e.created_entity())
        .expect("Bogen erzeugt");
    let neighbours = [1, 3].map(|p| registry.by_position(p).and_then(|e| e.created_entity()));
    match host.inner.entity(elbow) {
        Some(ModelEntity::Fitting(f)) => {
            assert_eq!([Some(f.connected[0]), Some(f.connected[1])], neighbours);
        }
        other => panic!("Unerwartetes Element: {other:?}"),
    }
}

#[test]
fn test_rohrsystem_aus_element_hat_vorrang() {
    let registry = load_fixture();
    let options = BuildOptions::default();
    let mut host = RecordingHost::seeded();

    BuildPass::new(&mut host, &options).run(&registry);

    let system_of = |position: u32| {
        let id = registry
            .by_position(position)
            .and_then(|e| e.created_entity())?;
        match host.inner.entity(id) {
            Some(ModelEntity::Segment(seg)) => Some(seg.system),
            _ => None,
        }
    };
    assert_eq!(system_of(1), Some(options.default_system_type));
    assert_eq!(system_of(6), Some(SystemTypeId(7)));
}

#[test]
fn test_fehler_brechen_den_durchlauf_nicht_ab() {
    let registry = load_fixture();
    let options = BuildOptions {
        elbow_family: "Nicht im Katalog".to_string(),
        ..Default::default()
    };
    let mut host = RecordingHost::seeded();

    let report = BuildPass::new(&mut host, &options).run(&registry);

    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failures().next().map(|e| e.position()), Some(2));
    assert_eq!(host.inner.segment_count(), 3);
    assert_eq!(host.inner.instance_count(), 1);
}

#[test]
fn test_zweiter_durchlauf_erzeugt_nichts_neu() {
    let registry = load_fixture();
    let options = BuildOptions::default();
    let mut host = RecordingHost::seeded();

    BuildPass::new(&mut host, &options).run(&registry);
    let entities_before = host.inner.entity_count();
    let report = BuildPass::new(&mut host, &options).run(&registry);

    assert_eq!(report.failed(), 5, "bereits erzeugte Elemente werden abgelehnt");
    assert_eq!(report.skipped(), 1);
    assert_eq!(host.inner.entity_count(), entities_before);
}
