//! Schnittstelle zum CAD-Host-Modell.
//!
//! Der Importer erzeugt, löscht und parametriert Elemente ausschließlich
//! über [`ModelHost`]. Transaktionen gehören dem Aufrufer.

pub mod memory;

use glam::DVec3;

use crate::core::{
    Category, Connector, EntityId, FamilyId, LevelId, ParameterKey, SegmentTypeId,
    StructuralKind, SystemTypeId,
};

pub use memory::{FaultPlan, InMemoryModel, ModelEntity};

/// Fehler, die der Host bei einer Operation meldet
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    /// Referenziertes Element existiert nicht (mehr)
    #[error("Entity {0} existiert nicht")]
    EntityNotFound(EntityId),
    /// Parameter ist im Schema des Elements nicht vorhanden
    #[error("Parameter '{}' wird von {entity} nicht unterstützt", .key.display_name())]
    UnknownParameter {
        /// Betroffenes Element
        entity: EntityId,
        /// Abgelehnter Schlüssel
        key: ParameterKey,
    },
    /// Host konnte das Element nicht erzeugen
    #[error("Erzeugung fehlgeschlagen: {0}")]
    CreationFailed(String),
    /// Sonstiger Host-Fehler
    #[error("Host-Fehler: {0}")]
    Fault(String),
}

/// Fähigkeiten des CAD-Hosts, die der Importer benötigt.
pub trait ModelHost {
    /// Erzeugt ein gerades Segment zwischen `start` und `end`.
    fn create_segment(
        &mut self,
        system: SystemTypeId,
        segment_type: SegmentTypeId,
        level: LevelId,
        start: DVec3,
        end: DVec3,
    ) -> Result<EntityId, HostError>;

    /// `true`, wenn das Element den Parameter im Schema führt.
    fn supports_parameter(&self, entity: EntityId, key: ParameterKey) -> bool;

    /// Liest einen numerischen Parameter.
    fn parameter(&self, entity: EntityId, key: ParameterKey) -> Result<f64, HostError>;

    /// Schreibt einen numerischen Parameter.
    fn set_parameter(
        &mut self,
        entity: EntityId,
        key: ParameterKey,
        value: f64,
    ) -> Result<(), HostError>;

    /// Entfernt ein zuvor erzeugtes Element.
    fn delete_entity(&mut self, entity: EntityId) -> Result<(), HostError>;

    /// Sucht einen Katalog-Eintrag über den exakten Namen.
    fn find_family(&self, category: Category, name: &str) -> Option<FamilyId>;

    /// Alle Geschosse in Host-Reihenfolge.
    fn levels(&self) -> Vec<LevelId>;

    /// Stirnseitige Connectors eines Segments (ohne Abzweig-Connectors).
    fn end_connectors(&self, segment: EntityId) -> Result<Vec<Connector>, HostError>;

    /// Erzeugt ein Formteil, das zwei Connectors verbindet.
    fn create_connected_fitting(
        &mut self,
        first: &Connector,
        second: &Connector,
    ) -> Result<EntityId, HostError>;

    /// Platziert ein Katalog-Bauteil ohne Connector-Verbindung.
    fn instantiate_family(
        &mut self,
        family: FamilyId,
        point: DVec3,
        structural: StructuralKind,
    ) -> Result<EntityId, HostError>;

    /// Übernimmt ausstehende Geometrie, damit Folgeabfragen sie sehen.
    fn regenerate(&mut self) -> Result<(), HostError>;

    /// Sichtbare Fehlermeldung an den Benutzer.
    fn report_error(&mut self, message: &str);

    /// Setzt einen Parameter nach Prüfung gegen das Schema des Elements.
    ///
    /// Unbekannte Schlüssel schlagen sofort mit [`HostError::UnknownParameter`] fehl.
    fn set_checked_parameter(
        &mut self,
        entity: EntityId,
        key: ParameterKey,
        value: f64,
    ) -> Result<(), HostError> {
        if !self.supports_parameter(entity, key) {
            return Err(HostError::UnknownParameter { entity, key });
        }
        self.set_parameter(entity, key, value)
    }
}
