//! Spatial-Index (KD-Tree) über Segment-Connectors für das Endpunkt-Matching.

use glam::DVec3;
use kiddo::{KdTree, SquaredEuclidean};

use super::geometry::is_equal_within;
use super::Connector;

/// Read-only Index über Segment-Connectors.
///
/// Wird pro Fitting-Auflösung frisch aufgebaut; die Reihenfolge der
/// Connectors entspricht der Aufzählungsreihenfolge beim Aufbau.
#[derive(Debug, Clone)]
pub struct ConnectorIndex {
    tree: KdTree<f64, 3>,
    connectors: Vec<Connector>,
}

impl ConnectorIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            connectors: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den übergebenen Connectors.
    pub fn from_connectors(connectors: Vec<Connector>) -> Self {
        let entries: Vec<[f64; 3]> = connectors
            .iter()
            .map(|connector| connector.origin.to_array())
            .collect();

        Self {
            tree: (&entries).into(),
            connectors,
        }
    }

    /// Gibt die Anzahl indexierter Connectors zurück.
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Gibt `true` zurück, wenn keine Connectors im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Findet den Connector, der mit `point` zusammenfällt (Abstand < `tolerance`).
    ///
    /// Bei mehreren Treffern gewinnt der zuerst aufgezählte.
    pub fn find_coincident(&self, point: DVec3, tolerance: f64) -> Option<&Connector> {
        if self.is_empty() || tolerance <= 0.0 {
            return None;
        }

        // KD-Tree als Vorfilter mit doppeltem Radius, exakter Test danach
        let radius = tolerance * 2.0;
        self.tree
            .within_unsorted::<SquaredEuclidean>(&point.to_array(), radius * radius)
            .into_iter()
            .map(|entry| entry.item as usize)
            .filter(|&index| {
                self.connectors
                    .get(index)
                    .is_some_and(|c| is_equal_within(c.origin, point, tolerance))
            })
            .min()
            .and_then(|index| self.connectors.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConnectorKind, EntityId};

    fn end(owner: u64, index: u32, origin: DVec3) -> Connector {
        Connector::new(EntityId(owner), index, origin, ConnectorKind::End)
    }

    fn sample_index() -> ConnectorIndex {
        ConnectorIndex::from_connectors(vec![
            end(1, 0, DVec3::new(0.0, 0.0, 0.0)),
            end(1, 1, DVec3::new(10.0, 0.0, 0.0)),
            end(2, 0, DVec3::new(10.0, 0.0, 0.0)),
            end(2, 1, DVec3::new(10.0, 5.0, 0.0)),
        ])
    }

    #[test]
    fn coincident_lookup_prefers_first_enumerated() {
        let index = sample_index();
        let hit = index
            .find_coincident(DVec3::new(10.0, 0.0, 1.0e-9), 1.0e-6)
            .expect("Treffer erwartet");

        assert_eq!(hit.owner, EntityId(1));
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn coincident_lookup_respects_tolerance() {
        let index = sample_index();
        assert!(index
            .find_coincident(DVec3::new(10.0, 5.0, 0.01), 1.0e-3)
            .is_none());
        assert!(index.find_coincident(DVec3::ZERO, 0.0).is_none());
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = ConnectorIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.find_coincident(DVec3::ZERO, 1.0).is_none());
    }
}
