//! Zentrale Konfiguration für den PCF-Import.
//!
//! `BuildOptions` wird einmal vor dem Durchlauf geladen und danach nur
//! gelesen. Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

use crate::core::{LevelId, SegmentTypeId, SystemTypeId};

// ── Connector-Matching ──────────────────────────────────────────────

/// Maximale Distanz (Modelleinheiten), bei der zwei Punkte als identisch gelten.
///
/// Groß genug für Rundungsrauschen aus Einheiten-Transformationen,
/// klein genug, um benachbarte Rohrenden nicht zu verschmelzen.
pub const CONNECTOR_TOLERANCE: f64 = 1.0e-6;
/// Länge eines Platzhalter-Segments als Vielfaches des Schenkels (Endpunkt − Mittelpunkt).
pub const PLACEHOLDER_LENGTH_FACTOR: f64 = 2.0;

// ── Host-Typen ──────────────────────────────────────────────────────

/// Standard-Rohrtyp für gerade Segmente.
pub const DEFAULT_SEGMENT_TYPE: SegmentTypeId = SegmentTypeId(3048519);
/// Standard-Rohrsystem, wenn das Element keines mitbringt.
pub const DEFAULT_SYSTEM_TYPE: SystemTypeId = SystemTypeId(1);

// ── Katalog ─────────────────────────────────────────────────────────

/// Family + Typ für Rohrbögen.
pub const ELBOW_FAMILY: &str = "EN 10253-2 - Elbow: 3D";
/// Family + Typ für gleichschenklige T-Stücke.
pub const TEE_FAMILY: &str = "EN 10253-2 - Tee: Tee Type B";
/// Family + Typ für reduzierende T-Stücke.
pub const REDUCING_TEE_FAMILY: &str = "EN 10253-2 - Reducing Tee: Red Tee Type B";

/// Reihenfolge, in der die Elemente abgearbeitet werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Reine Dateireihenfolge; fehlende Nachbarn werden über Platzhalter überbrückt
    #[default]
    FileOrder,
    /// Erst alle Rohre, dann alle übrigen Elemente (jeweils in Dateireihenfolge)
    SegmentsFirst,
}

/// Auswahl des Geschosses für neue Segmente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSelection {
    /// Erstes vom Host gemeldetes Geschoss
    #[default]
    First,
    /// Fest vorgegebenes Geschoss
    ById(LevelId),
}

/// Zuordnung Durchmesser → Rohrtyp. Regeln werden der Reihe nach geprüft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTypeRule {
    /// Obergrenze (inklusive) des Durchmessers; `None` passt immer
    #[serde(default)]
    pub max_diameter: Option<f64>,
    /// Rohrtyp im Host
    pub segment_type: SegmentTypeId,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle Import-Optionen.
/// Wird als `pcf_piping_importer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    // ── Matching ────────────────────────────────────────────────
    /// Toleranz für das Connector-Matching
    #[serde(default = "default_connector_tolerance")]
    pub connector_tolerance: f64,
    /// Längenfaktor für Platzhalter-Segmente
    #[serde(default = "default_placeholder_length_factor")]
    pub placeholder_length_factor: f64,
    /// Abarbeitungsreihenfolge
    #[serde(default)]
    pub schedule: Schedule,

    // ── Host-Typen ──────────────────────────────────────────────
    /// Rohrsystem, wenn das Element keines vorgibt
    pub default_system_type: SystemTypeId,
    /// Rohrtyp, wenn keine Regel greift
    pub default_segment_type: SegmentTypeId,

    // ── Katalog ─────────────────────────────────────────────────
    /// Family + Typ für ELBOW
    pub elbow_family: String,
    /// Family + Typ für TEE
    pub tee_family: String,
    /// Family + Typ für reduzierende TEE
    pub reducing_tee_family: String,

    // ── Geschoss ────────────────────────────────────────────────
    /// Geschossauswahl für neue Segmente
    #[serde(default)]
    pub level: LevelSelection,

    // ── Typ-Zuordnung ───────────────────────────────────────────
    /// Durchmesserabhängige Rohrtyp-Regeln
    #[serde(default)]
    pub segment_types: Vec<SegmentTypeRule>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            connector_tolerance: CONNECTOR_TOLERANCE,
            placeholder_length_factor: PLACEHOLDER_LENGTH_FACTOR,
            schedule: Schedule::default(),

            default_system_type: DEFAULT_SYSTEM_TYPE,
            default_segment_type: DEFAULT_SEGMENT_TYPE,

            elbow_family: ELBOW_FAMILY.to_string(),
            tee_family: TEE_FAMILY.to_string(),
            reducing_tee_family: REDUCING_TEE_FAMILY.to_string(),

            level: LevelSelection::default(),
            segment_types: Vec::new(),
        }
    }
}

/// Serde-Default für `connector_tolerance` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_connector_tolerance() -> f64 {
    CONNECTOR_TOLERANCE
}

/// Serde-Default für `placeholder_length_factor`.
fn default_placeholder_length_factor() -> f64 {
    PLACEHOLDER_LENGTH_FACTOR
}

impl BuildOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    Self::with_valid_tolerance(opts)
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Ersetzt eine nicht positive oder ungültige Toleranz durch den Standardwert.
    fn with_valid_tolerance(mut self) -> Self {
        let tolerance = self.connector_tolerance;
        if !(tolerance.is_finite() && tolerance > 0.0) {
            log::warn!(
                "connector_tolerance {} ungültig, verwende {}",
                tolerance,
                CONNECTOR_TOLERANCE
            );
            self.connector_tolerance = CONNECTOR_TOLERANCE;
        }
        self
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("pcf_piping_importer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("pcf_piping_importer.toml")
    }

    /// Rohrtyp für einen Durchmesser: erste passende Regel, sonst Standard.
    pub fn segment_type_for(&self, diameter: f64) -> SegmentTypeId {
        self.segment_types
            .iter()
            .find(|rule| rule.max_diameter.is_none_or(|max| diameter <= max))
            .map(|rule| rule.segment_type)
            .unwrap_or(self.default_segment_type)
    }

    /// Family-Name für ein T-Stück.
    pub fn tee_family_for(&self, reducing: bool) -> &str {
        if reducing {
            &self.reducing_tee_family
        } else {
            &self.tee_family
        }
    }
}
