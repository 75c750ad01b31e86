//! Ergebnisprotokoll eines Import-Durchlaufs.

use super::{BuildError, ErrorKind};

/// Status eines verarbeiteten Elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Element im Host erzeugt
    Succeeded,
    /// Typ ohne Builder, bewusst übersprungen
    Skipped,
    /// Erzeugung fehlgeschlagen
    Failed,
}

/// Ergebnis für ein einzelnes Element
#[derive(Debug, Clone)]
pub struct ElementOutcome {
    /// Quellposition
    pub position: u32,
    /// PCF-Typ
    pub element_type: String,
    /// Status
    pub status: OutcomeStatus,
    /// Fehler bei `Failed`
    pub error: Option<BuildError>,
}

/// Gesammelte Ergebnisse eines Durchlaufs in Verarbeitungsreihenfolge.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    outcomes: Vec<ElementOutcome>,
}

impl PassReport {
    /// Erstellt ein leeres Protokoll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt ein Ergebnis hinzu.
    pub fn record(&mut self, outcome: ElementOutcome) {
        self.outcomes.push(outcome);
    }

    /// Alle Ergebnisse in Verarbeitungsreihenfolge.
    pub fn outcomes(&self) -> &[ElementOutcome] {
        &self.outcomes
    }

    /// Ergebnis für eine Quellposition
    pub fn outcome_for(&self, position: u32) -> Option<&ElementOutcome> {
        self.outcomes.iter().find(|o| o.position == position)
    }

    /// Anzahl verarbeiteter Elemente
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// `true`, wenn nichts verarbeitet wurde
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Anzahl erfolgreich erzeugter Elemente
    pub fn succeeded(&self) -> usize {
        self.count(OutcomeStatus::Succeeded)
    }

    /// Anzahl übersprungener Elemente
    pub fn skipped(&self) -> usize {
        self.count(OutcomeStatus::Skipped)
    }

    /// Anzahl fehlgeschlagener Elemente
    pub fn failed(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Alle Fehler in Verarbeitungsreihenfolge.
    pub fn failures(&self) -> impl Iterator<Item = &BuildError> {
        self.outcomes.iter().filter_map(|o| o.error.as_ref())
    }

    /// Anzahl Fehler einer bestimmten Art
    pub fn failures_of(&self, kind: ErrorKind) -> usize {
        self.failures().filter(|e| e.kind() == kind).count()
    }

    /// Schreibt eine Zusammenfassung ins Log.
    pub fn log_summary(&self) {
        log::info!(
            "Import abgeschlossen: {} erzeugt, {} übersprungen, {} fehlgeschlagen",
            self.succeeded(),
            self.skipped(),
            self.failed()
        );
        for error in self.failures() {
            log::warn!("{}", error);
        }
    }
}
