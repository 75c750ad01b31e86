//! Repräsentiert einen Anschlusspunkt (Connector) eines Host-Elements.

use glam::DVec3;

use super::EntityId;

/// Art des Connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectorKind {
    /// Stirnseitiges Ende eines Segments
    #[default]
    End,
    /// Abzweig auf der Mantelfläche (Anbohrung, Stutzen)
    Branch,
}

/// Ein Anschlusspunkt eines Host-Elements
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Element, zu dem der Connector gehört
    pub owner: EntityId,
    /// Laufende Nummer innerhalb des Elements
    pub index: u32,
    /// Lage des Connectors im Modell
    pub origin: DVec3,
    /// Art des Connectors
    pub kind: ConnectorKind,
}

impl Connector {
    /// Erstellt einen neuen Connector
    pub fn new(owner: EntityId, index: u32, origin: DVec3, kind: ConnectorKind) -> Self {
        Self {
            owner,
            index,
            origin,
            kind,
        }
    }

    /// `true` für stirnseitige Enden
    pub fn is_end(&self) -> bool {
        self.kind == ConnectorKind::End
    }
}
