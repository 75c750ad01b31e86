//! Typ-Dispatcher: leitet ein Element an den passenden Builder weiter.

use super::builders;
use super::BuildError;
use crate::core::{ElementRegistry, ElementType, SymbolicElement};
use crate::host::ModelHost;
use crate::shared::BuildOptions;

/// Verteilt Elemente nach Typ an die Builder.
///
/// Die Registry wird pro Aufruf nur geteilt verliehen; Builder ändern
/// ausschließlich das übergebene Element.
pub struct ElementDispatcher<'a, H: ModelHost> {
    host: &'a mut H,
    options: &'a BuildOptions,
}

impl<'a, H: ModelHost> ElementDispatcher<'a, H> {
    /// Erstellt einen Dispatcher über dem Host mit festen Optionen.
    pub fn new(host: &'a mut H, options: &'a BuildOptions) -> Self {
        Self { host, options }
    }

    /// Verwendete Optionen
    pub fn options(&self) -> &BuildOptions {
        self.options
    }

    /// Verarbeitet ein Element.
    ///
    /// Unbekannte Typen sind kein Fehler und verändern den Host nicht.
    pub fn dispatch(
        &mut self,
        registry: &ElementRegistry,
        element: &SymbolicElement,
    ) -> Result<(), BuildError> {
        if let ElementType::NotImplemented(tag) = &element.element_type {
            log::debug!(
                "Position {}: Typ '{}' nicht implementiert, übersprungen",
                element.position,
                tag
            );
            return Ok(());
        }

        if let Some(existing) = element.created_entity() {
            return Err(BuildError::UnexpectedFault {
                position: element.position,
                message: format!("Element wurde bereits als {existing} erzeugt"),
            });
        }

        match element.element_type {
            ElementType::Pipe => builders::build_pipe(self.host, self.options, element),
            ElementType::Elbow => {
                builders::build_elbow(self.host, self.options, registry, element)
            }
            ElementType::Tee => builders::build_tee(self.host, self.options, element),
            ElementType::NotImplemented(_) => Ok(()),
        }
    }
}
