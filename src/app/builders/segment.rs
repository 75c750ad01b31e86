//! Builder: Gerades Rohrsegment (PIPE) und gemeinsame Segment-Primitive.

use glam::DVec3;

use crate::app::BuildError;
use crate::core::{EntityId, LevelId, ParameterKey, SymbolicElement, SystemTypeId};
use crate::host::ModelHost;
use crate::shared::{BuildOptions, LevelSelection};

/// Ermittelt das Geschoss gemäß `options.level`.
pub(crate) fn resolve_level<H: ModelHost>(
    host: &H,
    options: &BuildOptions,
    position: u32,
) -> Result<LevelId, BuildError> {
    let levels = host.levels();
    let level = match options.level {
        LevelSelection::First => levels.first().copied(),
        LevelSelection::ById(id) => levels.contains(&id).then_some(id),
    };

    level.ok_or_else(|| BuildError::UnexpectedFault {
        position,
        message: format!("kein passendes Geschoss ({:?})", options.level),
    })
}

/// Erzeugt ein Segment und setzt dessen Durchmesser.
///
/// Wird sowohl für PIPE-Elemente als auch für Platzhalter verwendet.
/// Lässt sich der Durchmesser nicht setzen, wird das Segment wieder entfernt.
pub(crate) fn create_segment<H: ModelHost>(
    host: &mut H,
    options: &BuildOptions,
    system: SystemTypeId,
    start: DVec3,
    end: DVec3,
    diameter: f64,
    position: u32,
) -> Result<EntityId, BuildError> {
    let level = resolve_level(host, options, position)?;
    let segment_type = options.segment_type_for(diameter);

    let segment = host
        .create_segment(system, segment_type, level, start, end)
        .map_err(|e| BuildError::from_host(position, e))?;

    if let Err(e) = host.set_checked_parameter(segment, ParameterKey::PipeDiameter, diameter) {
        if let Err(cleanup) = host.delete_entity(segment) {
            log::warn!(
                "Segment {} nach Parameterfehler nicht entfernbar: {}",
                segment,
                cleanup
            );
        }
        return Err(BuildError::from_host(position, e));
    }

    Ok(segment)
}

/// Erzeugt das Host-Segment für ein PIPE-Element.
pub fn build_pipe<H: ModelHost>(
    host: &mut H,
    options: &BuildOptions,
    element: &SymbolicElement,
) -> Result<(), BuildError> {
    let position = element.position;
    let system = element.piping_system.unwrap_or(options.default_system_type);

    let segment = create_segment(
        host,
        options,
        system,
        element.end_point1.coordinate,
        element.end_point2.coordinate,
        element.end_point1.diameter,
        position,
    )?;

    super::record_created(element, segment)?;
    log::debug!("PIPE an Position {} → {}", position, segment);
    Ok(())
}
