//! PCF Piping Importer (Trockenlauf).
//!
//! Lädt eine Element-Registry als JSON und spielt den Import gegen das
//! In-Memory-Host-Modell durch.

use anyhow::{bail, Result};
use pcf_piping_importer::{BuildOptions, BuildPass, ElementRegistry, InMemoryModel};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "PCF Piping Importer v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let mut args = std::env::args().skip(1);
    let Some(registry_path) = args.next().map(PathBuf::from) else {
        bail!("Aufruf: PCF-Piping-Importer <registry.json> [optionen.toml]");
    };
    let options_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(BuildOptions::config_path);

    // Optionen aus TOML laden (oder Standardwerte)
    let options = BuildOptions::load_from_file(&options_path);
    let registry = ElementRegistry::load_from_file(&registry_path)?;

    let mut model = InMemoryModel::seeded(&options);
    let report = BuildPass::new(&mut model, &options).run(&registry);
    report.log_summary();

    log::info!(
        "Modell: {} Segmente, {} Formteile, {} Bauteile",
        model.segment_count(),
        model.fitting_count(),
        model.instance_count()
    );

    Ok(())
}
