//! Builder: Rohrbogen (ELBOW) über zwei aufgelöste Connectors.

use crate::app::connectors::{index_segment_connectors, resolve_connector, PlaceholderScope};
use crate::app::BuildError;
use crate::core::{Category, ElementRegistry, SymbolicElement};
use crate::host::ModelHost;
use crate::shared::BuildOptions;

/// Erzeugt einen Rohrbogen zwischen den Connectors an `end_point1` und `end_point2`.
///
/// Der Katalog-Eintrag wird nur auf Existenz geprüft; das Formteil selbst
/// leitet der Host aus der Lage der beiden Connectors ab.
pub fn build_elbow<H: ModelHost>(
    host: &mut H,
    options: &BuildOptions,
    registry: &ElementRegistry,
    element: &SymbolicElement,
) -> Result<(), BuildError> {
    let position = element.position;

    if host
        .find_family(Category::PipeFitting, &options.elbow_family)
        .is_none()
    {
        let err = BuildError::FamilyNotFound {
            position,
            element_type: element.element_type.tag().to_string(),
            family: options.elbow_family.clone(),
        };
        host.report_error(&err.to_string());
        return Err(err);
    }

    let index = index_segment_connectors(host, registry);
    log::trace!(
        "ELBOW an Position {}: {} Segment-Connectors indexiert",
        position,
        index.len()
    );

    let mut scope = PlaceholderScope::new(host, position);
    let first = resolve_connector(&mut scope, &index, options, element, &element.end_point1)?;
    let second = resolve_connector(&mut scope, &index, options, element, &element.end_point2)?;

    let fitting = scope
        .host_mut()
        .create_connected_fitting(&first, &second)
        .map_err(|e| BuildError::from_host(position, e))?;

    // Nach dem Verbinden: Fehler beim Aufräumen oder Regenerieren verwerfen das Formteil
    let finished = scope.release().and_then(|removed| {
        if removed > 0 {
            log::debug!(
                "ELBOW an Position {}: {} Platzhalter entfernt",
                position,
                removed
            );
        }
        host.regenerate()
    });
    if let Err(e) = finished {
        if let Err(cleanup) = host.delete_entity(fitting) {
            log::warn!("Rohrbogen {} nicht entfernbar: {}", fitting, cleanup);
        }
        return Err(BuildError::from_host(position, e));
    }

    super::record_created(element, fitting)?;
    log::debug!("ELBOW an Position {} → {}", position, fitting);
    Ok(())
}
