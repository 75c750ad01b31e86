//! Builder: T-Stück (TEE) als platziertes Katalog-Bauteil.
//!
//! Das Bauteil wird am Mittelpunkt eingefügt, ohne Drehung auf die
//! tatsächlichen Rohrachsen und ohne Connector-Verbindung.

use crate::app::BuildError;
use crate::core::{Category, ParameterKey, StructuralKind, SymbolicElement};
use crate::host::ModelHost;
use crate::shared::BuildOptions;

/// Platziert ein T-Stück und setzt dessen Nenndurchmesser.
pub fn build_tee<H: ModelHost>(
    host: &mut H,
    options: &BuildOptions,
    element: &SymbolicElement,
) -> Result<(), BuildError> {
    let position = element.position;
    let main_diameter = element.end_point1.diameter;
    let branch_diameter = element.branch1_point.diameter;

    // Exakter Vergleich: Durchmesser stammen unverändert aus der Datei
    let reducing = branch_diameter != main_diameter;
    element.set_reducing(reducing);

    let family_name = options.tee_family_for(reducing);
    let Some(family) = host.find_family(Category::PipeFitting, family_name) else {
        let err = BuildError::FamilyNotFound {
            position,
            element_type: element.element_type.tag().to_string(),
            family: family_name.to_string(),
        };
        host.report_error(&err.to_string());
        return Err(err);
    };

    let instance = host
        .instantiate_family(
            family,
            element.centre_point.coordinate,
            StructuralKind::NonStructural,
        )
        .map_err(|e| BuildError::from_host(position, e))?;

    let mut diameters = vec![(ParameterKey::NominalDiameter1, main_diameter)];
    if reducing {
        diameters.push((ParameterKey::NominalDiameter3, branch_diameter));
    }

    for (key, value) in diameters {
        if let Err(e) = host.set_checked_parameter(instance, key, value) {
            if let Err(cleanup) = host.delete_entity(instance) {
                log::warn!("T-Stück {} nicht entfernbar: {}", instance, cleanup);
            }
            return Err(BuildError::from_host(position, e));
        }
    }

    super::record_created(element, instance)?;
    log::debug!(
        "TEE an Position {} → {} ({})",
        position,
        instance,
        if reducing { "reduzierend" } else { "gleich" }
    );
    Ok(())
}
