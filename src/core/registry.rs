//! Geordnete Sammlung aller symbolischen Elemente eines Import-Durchlaufs.

use anyhow::{Context, Result};
use std::path::Path;

use super::{ElementType, EntityId, SymbolicElement};

/// Fehler beim Befüllen der Registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Positionen müssen eindeutig und streng aufsteigend sein
    #[error("Position {position} folgt auf {previous}: Positionen müssen streng aufsteigend sein")]
    PositionNotIncreasing {
        /// Position des zuletzt eingefügten Elements
        previous: u32,
        /// Abgelehnte Position
        position: u32,
    },
}

/// Element-Registry: Elemente in Dateireihenfolge plus paralleler Positions-Index.
///
/// Der Positions-Index ist nur eine Abkürzung für Lookups; maßgeblich ist
/// `elements`. Während eines Durchlaufs wird die Registry nur geteilt
/// (read-only) an die Handler verliehen.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: Vec<SymbolicElement>,
    positions: Vec<u32>,
}

impl ElementRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut eine Registry aus Elementen in Dateireihenfolge.
    pub fn from_elements(
        elements: impl IntoIterator<Item = SymbolicElement>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for element in elements {
            registry.push(element)?;
        }
        Ok(registry)
    }

    /// Lädt eine Registry aus einer JSON-Datei (Array von Elementen).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Registry-Datei nicht lesbar: {}", path.display()))?;
        let registry = Self::from_json_str(&content)
            .with_context(|| format!("Registry-Datei fehlerhaft: {}", path.display()))?;
        log::info!(
            "{} Elemente geladen aus: {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parsed eine Registry aus einem JSON-String.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let elements: Vec<SymbolicElement> = serde_json::from_str(json)?;
        Ok(Self::from_elements(elements)?)
    }

    /// Hängt ein Element an. Die Position muss größer als alle bisherigen sein.
    pub fn push(&mut self, element: SymbolicElement) -> Result<(), RegistryError> {
        if let Some(&previous) = self.positions.last() {
            if element.position <= previous {
                return Err(RegistryError::PositionNotIncreasing {
                    previous,
                    position: element.position,
                });
            }
        }
        self.positions.push(element.position);
        self.elements.push(element);
        Ok(())
    }

    /// Anzahl der Elemente
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// `true`, wenn keine Elemente vorhanden sind
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterator in Dateireihenfolge
    pub fn iter(&self) -> impl Iterator<Item = &SymbolicElement> {
        self.elements.iter()
    }

    /// Element am Index (Dateireihenfolge)
    pub fn get(&self, index: usize) -> Option<&SymbolicElement> {
        self.elements.get(index)
    }

    /// Findet ein Element über seine Quellposition — O(log n).
    pub fn by_position(&self, position: u32) -> Option<&SymbolicElement> {
        self.positions
            .binary_search(&position)
            .ok()
            .and_then(|index| self.elements.get(index))
    }

    /// Alle PIPE-Elemente, für die bereits ein Host-Segment existiert.
    pub fn created_segments(&self) -> impl Iterator<Item = (&SymbolicElement, EntityId)> {
        self.elements.iter().filter_map(|element| {
            if element.element_type != ElementType::Pipe {
                return None;
            }
            element.created_entity().map(|entity| (element, entity))
        })
    }
}
