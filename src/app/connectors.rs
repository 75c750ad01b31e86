//! Connector-Auflösung für Formteile inklusive Platzhalter-Rückfallebene.
//!
//! Ablauf pro Fitting:
//! 1. Index über alle End-Connectors bereits erzeugter PIPE-Segmente aufbauen
//! 2. Fitting-Endpunkt gegen den Index matchen (Abstand < Toleranz)
//! 3. Ohne Treffer: Platzhalter-Segment vom Endpunkt weg vom Mittelpunkt
//!    erzeugen und dessen Connector am Endpunkt verwenden
//! 4. Platzhalter nach dem Verbinden wieder entfernen

use crate::app::builders::create_segment;
use crate::app::BuildError;
use crate::core::{
    is_equal_within, placeholder_far_point, Connector, ConnectorIndex, ElementRegistry, EntityId,
    SpacePoint, SymbolicElement,
};
use crate::host::{HostError, ModelHost};
use crate::shared::BuildOptions;

/// Baut den Connector-Index über alle erzeugten PIPE-Segmente der Registry.
///
/// Segmente, deren Connectors der Host nicht mehr liefert, werden übersprungen.
pub fn index_segment_connectors<H: ModelHost>(
    host: &H,
    registry: &ElementRegistry,
) -> ConnectorIndex {
    let mut connectors = Vec::new();
    for (element, segment) in registry.created_segments() {
        match host.end_connectors(segment) {
            Ok(found) => connectors.extend(found.into_iter().filter(Connector::is_end)),
            Err(e) => log::warn!(
                "Connectors von {} (Position {}) nicht lesbar: {}",
                segment,
                element.position,
                e
            ),
        }
    }
    if connectors.is_empty() {
        return ConnectorIndex::empty();
    }
    ConnectorIndex::from_connectors(connectors)
}

/// Hält die während einer Fitting-Auflösung erzeugten Platzhalter.
///
/// Platzhalter werden entweder explizit über [`PlaceholderScope::release`]
/// entfernt oder spätestens beim Drop, egal auf welchem Weg der Builder
/// verlassen wird.
pub struct PlaceholderScope<'h, H: ModelHost> {
    host: &'h mut H,
    placeholders: Vec<EntityId>,
    position: u32,
}

impl<'h, H: ModelHost> PlaceholderScope<'h, H> {
    /// Öffnet einen Scope für das Element an `position`.
    pub fn new(host: &'h mut H, position: u32) -> Self {
        Self {
            host,
            placeholders: Vec::new(),
            position,
        }
    }

    /// Zugriff auf den Host innerhalb des Scopes.
    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Registriert einen Platzhalter zur späteren Entfernung.
    pub fn track(&mut self, placeholder: EntityId) {
        self.placeholders.push(placeholder);
    }

    /// Entfernt alle Platzhalter und schließt den Scope.
    ///
    /// Gibt die Anzahl entfernter Platzhalter zurück. Bei einem Fehler
    /// werden die übrigen Platzhalter trotzdem entfernt.
    pub fn release(mut self) -> Result<usize, HostError> {
        self.delete_all()
    }

    fn delete_all(&mut self) -> Result<usize, HostError> {
        let placeholders = std::mem::take(&mut self.placeholders);
        let mut removed = 0;
        let mut first_error = None;
        for placeholder in placeholders {
            match self.host.delete_entity(placeholder) {
                Ok(()) => removed += 1,
                Err(e) => {
                    log::warn!(
                        "Platzhalter {} (Position {}) nicht entfernbar: {}",
                        placeholder,
                        self.position,
                        e
                    );
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }
}

impl<H: ModelHost> Drop for PlaceholderScope<'_, H> {
    fn drop(&mut self) {
        if self.placeholders.is_empty() {
            return;
        }
        let pending = self.placeholders.len();
        if let Ok(removed) = self.delete_all() {
            log::debug!(
                "{} von {} Platzhaltern für Position {} nach Abbruch entfernt",
                removed,
                pending,
                self.position
            );
        }
    }
}

/// Löst den Connector an `endpoint` auf – über den Index oder per Platzhalter.
pub fn resolve_connector<H: ModelHost>(
    scope: &mut PlaceholderScope<'_, H>,
    index: &ConnectorIndex,
    options: &BuildOptions,
    element: &SymbolicElement,
    endpoint: &SpacePoint,
) -> Result<Connector, BuildError> {
    let target = endpoint.coordinate;
    if let Some(connector) = index.find_coincident(target, options.connector_tolerance) {
        log::trace!(
            "Position {}: {} an {:?} gefunden",
            element.position,
            connector.owner,
            target
        );
        return Ok(connector.clone());
    }

    let unresolved = |reason: String| BuildError::ConnectorUnresolved {
        position: element.position,
        endpoint: endpoint.keyword.as_str().to_string(),
        reason,
    };

    let far = placeholder_far_point(
        target,
        element.centre_point.coordinate,
        options.placeholder_length_factor,
    )
    .ok_or_else(|| unresolved("Endpunkt fällt mit dem Mittelpunkt zusammen".to_string()))?;

    let system = element.piping_system.unwrap_or(options.default_system_type);
    let placeholder = create_segment(
        scope.host_mut(),
        options,
        system,
        target,
        far,
        endpoint.diameter,
        element.position,
    )?;
    scope.track(placeholder);
    log::debug!(
        "Position {}: Platzhalter {} für {} erzeugt",
        element.position,
        placeholder,
        endpoint.keyword.as_str()
    );

    let connectors = scope
        .host_mut()
        .end_connectors(placeholder)
        .map_err(|e| BuildError::from_host(element.position, e))?;

    connectors
        .into_iter()
        .find(|c| is_equal_within(c.origin, target, options.connector_tolerance))
        .ok_or_else(|| unresolved(format!("{placeholder} liefert keinen passenden Connector")))
}
